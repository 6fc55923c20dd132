//! Monthly dashboard aggregation: one snapshot combining income, credits,
//! allocations, budget items, and transactions for a month.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::balance::{compute_account_balances, AllocationLine, SpendLine};
use crate::core::rollup::{compute_category_rollup, PlannedLine, SpentLine};
use crate::domain::{
    CategoryRollup, CategorySummary, DashboardSnapshot, FundingKind, Month, Session,
};
use crate::store::EntityStore;

use super::{authorize, ServiceResult};

pub struct DashboardService;

impl DashboardService {
    /// Builds the dashboard snapshot for `month`.
    ///
    /// Later steps depend on earlier aggregates, so the order is fixed:
    /// funding sums, allocations joined to accounts, budget items joined to
    /// categories, transactions in the half-open UTC month range, the
    /// planned/unplanned partition, then the balance and rollup engines.
    /// A month with no data yields zeroed totals and empty lists.
    pub fn dashboard(
        store: &EntityStore,
        session: &Session,
        month: Month,
    ) -> ServiceResult<DashboardSnapshot> {
        authorize(store, session)?;
        let household = session.household_id;

        let income_entries = store.entries_for(household, month, FundingKind::Income);
        let credit_entries = store.entries_for(household, month, FundingKind::Credit);
        let income: Decimal = income_entries.iter().map(|e| e.total_amount).sum();
        let credits: Decimal = credit_entries.iter().map(|e| e.total_amount).sum();

        let entry_ids: Vec<Uuid> = income_entries
            .iter()
            .chain(credit_entries.iter())
            .map(|e| e.id)
            .collect();
        let allocation_lines: Vec<AllocationLine> = store
            .allocations_for_entries(&entry_ids)
            .into_iter()
            .filter_map(|alloc| {
                store.account(household, alloc.account_id).map(|account| AllocationLine {
                    account_id: account.id,
                    account_name: account.name.clone(),
                    amount: alloc.amount,
                })
            })
            .collect();

        let (start, end) = month.utc_range();
        let transactions = store.transactions_between(household, start, end);

        let total_planned_actual: Decimal = transactions
            .iter()
            .filter(|t| t.is_planned())
            .map(|t| t.amount)
            .sum();
        let total_unplanned_actual: Decimal = transactions
            .iter()
            .filter(|t| !t.is_planned())
            .map(|t| t.amount)
            .sum();
        let total_actual = total_planned_actual + total_unplanned_actual;

        let items = store.budget_items_for(household, month);
        let total_planned: Decimal = items.iter().map(|i| i.amount).sum();

        let spend_lines: Vec<SpendLine> = transactions
            .iter()
            .map(|t| SpendLine {
                account_id: t.paid_from_account_id,
                amount: t.amount,
            })
            .collect();
        let account_balances = compute_account_balances(&allocation_lines, &spend_lines);

        let rollup = Self::rollup_for(store, household, month);

        let total_inward = income + credits;
        Ok(DashboardSnapshot {
            month,
            income,
            credits,
            total_inward,
            total_planned,
            total_planned_actual,
            total_unplanned_actual,
            total_actual,
            net_cash_flow: total_inward - total_actual,
            account_balances,
            category_data: rollup.category_data,
            top_unplanned_categories: rollup.top_unplanned,
            budget_by_category: rollup.budget_by_category,
        })
    }

    /// The per-category budget table alone, without the rest of the snapshot.
    pub fn budget_by_category(
        store: &EntityStore,
        session: &Session,
        month: Month,
    ) -> ServiceResult<Vec<CategorySummary>> {
        authorize(store, session)?;
        Ok(Self::rollup_for(store, session.household_id, month).budget_by_category)
    }

    fn rollup_for(store: &EntityStore, household: Uuid, month: Month) -> CategoryRollup {
        let planned_lines: Vec<PlannedLine> = store
            .budget_items_for(household, month)
            .into_iter()
            .filter_map(|item| {
                store.category(household, item.category_id).map(|category| PlannedLine {
                    category_id: category.id,
                    category_name: category.name.clone(),
                    category_kind: category.kind,
                    amount: item.amount,
                })
            })
            .collect();

        let (start, end) = month.utc_range();
        let spent_lines: Vec<SpentLine> = store
            .transactions_between(household, start, end)
            .into_iter()
            .filter_map(|txn| {
                store.category(household, txn.category_id).map(|category| SpentLine {
                    category_id: category.id,
                    category_name: category.name.clone(),
                    amount: txn.amount,
                    budget_item_id: txn.budget_item_id,
                })
            })
            .collect();

        compute_category_rollup(&planned_lines, &spent_lines)
    }
}
