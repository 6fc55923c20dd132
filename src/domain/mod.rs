//! Domain models for the budgeting core. Every persisted entity carries a
//! `household_id`; cross-household access is rejected at every read and write.

pub mod account;
pub mod budget_item;
pub mod category;
pub mod common;
pub mod funding;
pub mod household;
pub mod month;
pub mod reminder;
pub mod summary;
pub mod template;
pub mod transaction;

pub use account::PaymentAccount;
pub use budget_item::BudgetItem;
pub use category::{Category, CategoryKind};
pub use common::{HouseholdScoped, Identifiable};
pub use funding::{FundAllocation, FundingEntry, FundingKind};
pub use household::{Household, Role, Session};
pub use month::Month;
pub use reminder::PaymentReminder;
pub use summary::{
    AccountBalance, CategoryPlanActual, CategoryRollup, CategorySummary, DashboardSnapshot,
    MonthlySummary, UnplannedCategory,
};
pub use template::ExpenseTemplate;
pub use transaction::Transaction;
