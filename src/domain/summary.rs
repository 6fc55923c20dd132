//! Derived report types produced by the aggregation engine. None of these are
//! persisted; they are recomputed from current state on every call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::CategoryKind;
use crate::domain::month::Month;

/// Per-account funding versus spend for one month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountBalance {
    pub account_id: Uuid,
    pub account_name: String,
    pub allocated: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

/// Planned versus actual spend for a category that has at least one budget
/// item this month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryPlanActual {
    pub category: String,
    pub planned: Decimal,
    pub actual: Decimal,
}

/// Unlinked spend grouped by category name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnplannedCategory {
    pub name: String,
    pub amount: Decimal,
}

/// One row of the budget-by-category table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySummary {
    pub category_name: String,
    pub category_kind: CategoryKind,
    pub budget_amount: Decimal,
    pub actual_spent: Decimal,
    pub remaining: Decimal,
}

/// Output of the category rollup engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryRollup {
    pub category_data: Vec<CategoryPlanActual>,
    pub top_unplanned: Vec<UnplannedCategory>,
    pub budget_by_category: Vec<CategorySummary>,
}

/// One month of dashboard aggregates. A month with no data zeroes every
/// numeric field and empties every list; callers never null-check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub month: Month,
    pub income: Decimal,
    pub credits: Decimal,
    pub total_inward: Decimal,
    pub total_planned: Decimal,
    pub total_planned_actual: Decimal,
    pub total_unplanned_actual: Decimal,
    pub total_actual: Decimal,
    /// `total_inward - total_actual`; derived for callers, never stored.
    pub net_cash_flow: Decimal,
    pub account_balances: Vec<AccountBalance>,
    pub category_data: Vec<CategoryPlanActual>,
    pub top_unplanned_categories: Vec<UnplannedCategory>,
    pub budget_by_category: Vec<CategorySummary>,
}

/// Flattened per-month row for multi-month reports. Trend deltas are left to
/// the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    pub month_year: Month,
    pub income: Decimal,
    pub credits: Decimal,
    pub total_inward: Decimal,
    pub total_planned: Decimal,
    pub total_actual: Decimal,
    pub total_planned_actual: Decimal,
    pub total_unplanned_actual: Decimal,
}

impl MonthlySummary {
    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        Self {
            month_year: snapshot.month,
            income: snapshot.income,
            credits: snapshot.credits,
            total_inward: snapshot.total_inward,
            total_planned: snapshot.total_planned,
            total_actual: snapshot.total_actual,
            total_planned_actual: snapshot.total_planned_actual,
            total_unplanned_actual: snapshot.total_unplanned_actual,
        }
    }
}
