//! Money entering the household: income and credit entries plus their
//! per-account fund allocations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{HouseholdScoped, Identifiable};
use crate::domain::month::Month;

/// One income or credit entry for a month. A month's total income (or credit)
/// is the sum across its entries, never a single stored row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundingEntry {
    pub id: Uuid,
    pub household_id: Uuid,
    pub kind: FundingKind,
    pub month: Month,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl FundingEntry {
    pub fn new(
        household_id: Uuid,
        kind: FundingKind,
        month: Month,
        description: Option<String>,
        total_amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            household_id,
            kind,
            month,
            description,
            total_amount,
            created_at: Utc::now(),
        }
    }
}

impl Identifiable for FundingEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HouseholdScoped for FundingEntry {
    fn household_id(&self) -> Uuid {
        self.household_id
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FundingKind {
    Income,
    Credit,
}

/// Portion of a funding entry assigned to a payment account. Replaced
/// atomically with its parent entry; deleting the entry cascades here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundAllocation {
    pub id: Uuid,
    pub entry_id: Uuid,
    pub account_id: Uuid,
    pub amount: Decimal,
}

impl FundAllocation {
    pub fn new(entry_id: Uuid, account_id: Uuid, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            entry_id,
            account_id,
            amount,
        }
    }
}

impl Identifiable for FundAllocation {
    fn id(&self) -> Uuid {
        self.id
    }
}
