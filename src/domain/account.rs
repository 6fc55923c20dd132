use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{HouseholdScoped, Identifiable};

/// A bucket of money funded by allocations and drawn down by transactions,
/// e.g. "Primary Account". Deletion is forbidden while referenced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentAccount {
    pub id: Uuid,
    pub household_id: Uuid,
    pub name: String,
}

impl PaymentAccount {
    pub fn new(household_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            household_id,
            name: name.into(),
        }
    }
}

impl Identifiable for PaymentAccount {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HouseholdScoped for PaymentAccount {
    fn household_id(&self) -> Uuid {
        self.household_id
    }
}
