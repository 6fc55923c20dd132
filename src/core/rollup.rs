//! Planned-versus-actual rollup by category, including unplanned spend.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::category::CategoryKind;
use crate::domain::summary::{CategoryPlanActual, CategoryRollup, CategorySummary, UnplannedCategory};

/// How many unplanned categories the rollup surfaces.
pub const TOP_UNPLANNED_LIMIT: usize = 3;

/// One budget item joined to its category.
#[derive(Debug, Clone)]
pub struct PlannedLine {
    pub category_id: Uuid,
    pub category_name: String,
    pub category_kind: CategoryKind,
    pub amount: Decimal,
}

/// One transaction joined to its category, keeping the budget link so
/// unplanned spend can be told apart.
#[derive(Debug, Clone)]
pub struct SpentLine {
    pub category_id: Uuid,
    pub category_name: String,
    pub amount: Decimal,
    pub budget_item_id: Option<Uuid>,
}

/// Groups budget items and transactions by category.
///
/// A category appears in `category_data`/`budget_by_category` only when it has
/// at least one budget item this month; its `actual` then counts every
/// transaction in the category, linked or not. `top_unplanned` instead counts
/// transactions with no budget link regardless of category, summed by category
/// name, descending, truncated to [`TOP_UNPLANNED_LIMIT`]. Equal amounts keep
/// first-encounter order (stable sort, no secondary key).
pub fn compute_category_rollup(items: &[PlannedLine], transactions: &[SpentLine]) -> CategoryRollup {
    let mut order: Vec<Uuid> = Vec::new();
    let mut planned: HashMap<Uuid, (String, CategoryKind, Decimal)> = HashMap::new();
    for item in items {
        let slot = planned.entry(item.category_id).or_insert_with(|| {
            order.push(item.category_id);
            (item.category_name.clone(), item.category_kind, Decimal::ZERO)
        });
        slot.2 += item.amount;
    }

    let mut actual: HashMap<Uuid, Decimal> = HashMap::new();
    for txn in transactions {
        if planned.contains_key(&txn.category_id) {
            *actual.entry(txn.category_id).or_insert(Decimal::ZERO) += txn.amount;
        }
    }

    let mut unplanned_order: Vec<String> = Vec::new();
    let mut unplanned: HashMap<String, Decimal> = HashMap::new();
    for txn in transactions.iter().filter(|t| t.budget_item_id.is_none()) {
        let slot = unplanned.entry(txn.category_name.clone()).or_insert_with(|| {
            unplanned_order.push(txn.category_name.clone());
            Decimal::ZERO
        });
        *slot += txn.amount;
    }
    let mut top_unplanned: Vec<UnplannedCategory> = unplanned_order
        .into_iter()
        .filter_map(|name| {
            unplanned
                .remove(&name)
                .map(|amount| UnplannedCategory { name, amount })
        })
        .collect();
    top_unplanned.sort_by(|a, b| b.amount.cmp(&a.amount));
    top_unplanned.truncate(TOP_UNPLANNED_LIMIT);

    let mut category_data = Vec::with_capacity(order.len());
    let mut budget_by_category = Vec::with_capacity(order.len());
    for category_id in order {
        if let Some((name, kind, budget_amount)) = planned.remove(&category_id) {
            let actual_spent = actual.get(&category_id).copied().unwrap_or(Decimal::ZERO);
            category_data.push(CategoryPlanActual {
                category: name.clone(),
                planned: budget_amount,
                actual: actual_spent,
            });
            budget_by_category.push(CategorySummary {
                category_name: name,
                category_kind: kind,
                budget_amount,
                actual_spent,
                remaining: budget_amount - actual_spent,
            });
        }
    }

    CategoryRollup {
        category_data,
        top_unplanned,
        budget_by_category,
    }
}
