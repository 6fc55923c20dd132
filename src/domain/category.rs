use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{HouseholdScoped, Identifiable};

/// Categorises budget items and transactions. Immutable once created;
/// deletion is restricted while referenced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub household_id: Uuid,
    pub name: String,
    pub kind: CategoryKind,
}

impl Category {
    pub fn new(household_id: Uuid, name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            household_id,
            name: name.into(),
            kind,
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HouseholdScoped for Category {
    fn household_id(&self) -> Uuid {
        self.household_id
    }
}

/// Drives UI grouping and mandatory-total calculations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Mandatory,
    Periodic,
    AdHoc,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::Mandatory => "Mandatory",
            CategoryKind::Periodic => "Periodic",
            CategoryKind::AdHoc => "Ad hoc",
        };
        f.write_str(label)
    }
}
