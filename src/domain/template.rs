use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::budget_item::BudgetItem;
use crate::domain::common::{HouseholdScoped, Identifiable};

/// Reusable expense shape. "In use" is a derived state: a value-identical
/// budget item exists in the same household. Two templates with identical
/// fields are indistinguishable for that check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseTemplate {
    pub id: Uuid,
    pub household_id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub category_id: Uuid,
    pub account_id: Uuid,
}

impl ExpenseTemplate {
    pub fn new(
        household_id: Uuid,
        description: impl Into<String>,
        amount: Decimal,
        category_id: Uuid,
        account_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            household_id,
            description: description.into(),
            amount,
            category_id,
            account_id,
        }
    }

    /// Value-equality match driving the derived "in use" state.
    pub fn matches(&self, item: &BudgetItem) -> bool {
        self.household_id == item.household_id
            && self.description == item.description
            && self.amount == item.amount
            && self.category_id == item.category_id
            && self.account_id == item.account_id
    }
}

impl Identifiable for ExpenseTemplate {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HouseholdScoped for ExpenseTemplate {
    fn household_id(&self) -> Uuid {
        self.household_id
    }
}
