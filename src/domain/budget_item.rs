use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{HouseholdScoped, Identifiable};
use crate::domain::month::Month;

/// Planned spend for one month. Deletion is a hard delete; transactions
/// linked to the item have their link nulled, not cascaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetItem {
    pub id: Uuid,
    pub household_id: Uuid,
    pub month: Month,
    pub description: String,
    pub amount: Decimal,
    pub category_id: Uuid,
    pub account_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_tag: Option<String>,
}

impl BudgetItem {
    pub fn new(
        household_id: Uuid,
        month: Month,
        description: impl Into<String>,
        amount: Decimal,
        category_id: Uuid,
        account_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            household_id,
            month,
            description: description.into(),
            amount,
            category_id,
            account_id,
            color_tag: None,
        }
    }

    /// Clones the item into `month` under a fresh identity, preserving
    /// description, amount, category, and account.
    pub fn clone_into(&self, month: Month) -> BudgetItem {
        BudgetItem {
            id: Uuid::new_v4(),
            household_id: self.household_id,
            month,
            description: self.description.clone(),
            amount: self.amount,
            category_id: self.category_id,
            account_id: self.account_id,
            color_tag: self.color_tag.clone(),
        }
    }
}

impl Identifiable for BudgetItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HouseholdScoped for BudgetItem {
    fn household_id(&self) -> Uuid {
        self.household_id
    }
}
