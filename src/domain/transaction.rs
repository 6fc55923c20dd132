use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{HouseholdScoped, Identifiable};

/// Actual spend. A set `budget_item_id` links the transaction to a budgeted
/// expense ("planned"); `None` means unplanned spend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub household_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub description: String,
    pub amount: Decimal,
    pub category_id: Uuid,
    pub paid_from_account_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_item_id: Option<Uuid>,
}

impl Transaction {
    pub fn new(
        household_id: Uuid,
        occurred_at: DateTime<Utc>,
        description: impl Into<String>,
        amount: Decimal,
        category_id: Uuid,
        paid_from_account_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            household_id,
            occurred_at,
            description: description.into(),
            amount,
            category_id,
            paid_from_account_id,
            notes: None,
            budget_item_id: None,
        }
    }

    /// Links the transaction to a budget item.
    pub fn with_budget_item(mut self, budget_item_id: Uuid) -> Self {
        self.budget_item_id = Some(budget_item_id);
        self
    }

    pub fn is_planned(&self) -> bool {
        self.budget_item_id.is_some()
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HouseholdScoped for Transaction {
    fn household_id(&self) -> Uuid {
        self.household_id
    }
}
