//! In-memory entity store standing in for the relational database the
//! production deployment keeps behind a connection pool. Supports the filtered
//! reads the services need (equality, date range, id set) and all-or-nothing
//! multi-row writes via [`EntityStore::transact`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    BudgetItem, Category, ExpenseTemplate, FundAllocation, FundingEntry, FundingKind, Household,
    Month, PaymentAccount, PaymentReminder, Transaction,
};
use crate::errors::CoreError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    pub households: Vec<Household>,
    pub accounts: Vec<PaymentAccount>,
    pub categories: Vec<Category>,
    pub entries: Vec<FundingEntry>,
    pub allocations: Vec<FundAllocation>,
    pub budget_items: Vec<BudgetItem>,
    pub transactions: Vec<Transaction>,
    pub templates: Vec<ExpenseTemplate>,
    pub reminders: Vec<PaymentReminder>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` against a working copy and commits only on success, so a
    /// multi-row write is either fully applied or fully absent from every
    /// later read.
    pub fn transact<T>(
        &mut self,
        f: impl FnOnce(&mut EntityStore) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let mut draft = self.clone();
        let out = f(&mut draft)?;
        *self = draft;
        Ok(out)
    }

    // Point reads. Each takes the household first and treats a wrong-household
    // id the same as a missing one.

    pub fn household(&self, id: Uuid) -> Option<&Household> {
        self.households.iter().find(|h| h.id == id)
    }

    pub fn household_mut(&mut self, id: Uuid) -> Option<&mut Household> {
        self.households.iter_mut().find(|h| h.id == id)
    }

    pub fn account(&self, household_id: Uuid, id: Uuid) -> Option<&PaymentAccount> {
        self.accounts
            .iter()
            .find(|a| a.household_id == household_id && a.id == id)
    }

    pub fn account_mut(&mut self, household_id: Uuid, id: Uuid) -> Option<&mut PaymentAccount> {
        self.accounts
            .iter_mut()
            .find(|a| a.household_id == household_id && a.id == id)
    }

    pub fn category(&self, household_id: Uuid, id: Uuid) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.household_id == household_id && c.id == id)
    }

    pub fn entry(&self, household_id: Uuid, id: Uuid) -> Option<&FundingEntry> {
        self.entries
            .iter()
            .find(|e| e.household_id == household_id && e.id == id)
    }

    pub fn entry_mut(&mut self, household_id: Uuid, id: Uuid) -> Option<&mut FundingEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.household_id == household_id && e.id == id)
    }

    pub fn budget_item(&self, household_id: Uuid, id: Uuid) -> Option<&BudgetItem> {
        self.budget_items
            .iter()
            .find(|i| i.household_id == household_id && i.id == id)
    }

    pub fn transaction(&self, household_id: Uuid, id: Uuid) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|t| t.household_id == household_id && t.id == id)
    }

    pub fn transaction_mut(&mut self, household_id: Uuid, id: Uuid) -> Option<&mut Transaction> {
        self.transactions
            .iter_mut()
            .find(|t| t.household_id == household_id && t.id == id)
    }

    pub fn template(&self, household_id: Uuid, id: Uuid) -> Option<&ExpenseTemplate> {
        self.templates
            .iter()
            .find(|t| t.household_id == household_id && t.id == id)
    }

    pub fn template_mut(&mut self, household_id: Uuid, id: Uuid) -> Option<&mut ExpenseTemplate> {
        self.templates
            .iter_mut()
            .find(|t| t.household_id == household_id && t.id == id)
    }

    pub fn reminder(&self, household_id: Uuid, id: Uuid) -> Option<&PaymentReminder> {
        self.reminders
            .iter()
            .find(|r| r.household_id == household_id && r.id == id)
    }

    pub fn reminder_mut(&mut self, household_id: Uuid, id: Uuid) -> Option<&mut PaymentReminder> {
        self.reminders
            .iter_mut()
            .find(|r| r.household_id == household_id && r.id == id)
    }

    // Filtered reads.

    pub fn accounts_for(&self, household_id: Uuid) -> Vec<&PaymentAccount> {
        self.accounts
            .iter()
            .filter(|a| a.household_id == household_id)
            .collect()
    }

    pub fn categories_for(&self, household_id: Uuid) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.household_id == household_id)
            .collect()
    }

    pub fn entries_for(
        &self,
        household_id: Uuid,
        month: Month,
        kind: FundingKind,
    ) -> Vec<&FundingEntry> {
        self.entries
            .iter()
            .filter(|e| e.household_id == household_id && e.month == month && e.kind == kind)
            .collect()
    }

    pub fn allocations_for_entry(&self, entry_id: Uuid) -> Vec<&FundAllocation> {
        self.allocations
            .iter()
            .filter(|a| a.entry_id == entry_id)
            .collect()
    }

    /// Allocations belonging to any entry in `entry_ids` (id-set filter).
    pub fn allocations_for_entries(&self, entry_ids: &[Uuid]) -> Vec<&FundAllocation> {
        self.allocations
            .iter()
            .filter(|a| entry_ids.contains(&a.entry_id))
            .collect()
    }

    pub fn budget_items_for(&self, household_id: Uuid, month: Month) -> Vec<&BudgetItem> {
        self.budget_items
            .iter()
            .filter(|i| i.household_id == household_id && i.month == month)
            .collect()
    }

    /// Transactions whose timestamp falls within `[start, end)`.
    pub fn transactions_between(
        &self,
        household_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.household_id == household_id && t.occurred_at >= start && t.occurred_at < end)
            .collect()
    }

    pub fn templates_for(&self, household_id: Uuid) -> Vec<&ExpenseTemplate> {
        self.templates
            .iter()
            .filter(|t| t.household_id == household_id)
            .collect()
    }

    pub fn reminders_for(&self, household_id: Uuid) -> Vec<&PaymentReminder> {
        self.reminders
            .iter()
            .filter(|r| r.household_id == household_id)
            .collect()
    }

    // Snapshot helpers for hosts that persist the store between requests.

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self).map_err(|err| CoreError::OperationFailed(err.to_string()))
    }

    pub fn from_json(data: &str) -> Result<Self, CoreError> {
        serde_json::from_str(data).map_err(|err| CoreError::OperationFailed(err.to_string()))
    }
}
