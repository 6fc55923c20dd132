//! Service layer: every public function takes an explicit [`Session`] and
//! re-verifies household scope before touching the store.

pub mod account_service;
pub mod allocation_service;
pub mod budget_service;
pub mod category_service;
pub mod dashboard_service;
pub mod household_service;
pub mod reminder_service;
pub mod report_service;
pub mod template_service;
pub mod transaction_service;

pub use account_service::AccountService;
pub use allocation_service::{validate_allocations, AllocationInput, FundingService};
pub use budget_service::{BudgetService, NewBudgetItem};
pub use category_service::CategoryService;
pub use dashboard_service::DashboardService;
pub use household_service::HouseholdService;
pub use reminder_service::{NewReminder, ReminderService};
pub use report_service::ReportService;
pub use template_service::TemplateService;
pub use transaction_service::{NewTransaction, TransactionService};

use rust_decimal::Decimal;

use crate::domain::Session;
use crate::errors::CoreError;
use crate::store::EntityStore;

pub type ServiceResult<T> = Result<T, CoreError>;

/// Rejects callers whose session does not resolve to a live household.
/// Runs before any other query in every public service function.
pub(crate) fn authorize(store: &EntityStore, session: &Session) -> ServiceResult<()> {
    if store.household(session.household_id).is_none() {
        return Err(CoreError::Unauthorized);
    }
    Ok(())
}

/// Admin-only mutations funnel through this check.
pub(crate) fn require_admin(session: &Session) -> ServiceResult<()> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(CoreError::Unauthorized)
    }
}

/// Monetary amounts are non-negative with at most two fraction digits.
pub(crate) fn valid_amount(amount: Decimal) -> bool {
    amount >= Decimal::ZERO && amount.normalize().scale() <= 2
}

pub(crate) fn ensure_valid_amount(amount: Decimal) -> ServiceResult<()> {
    if valid_amount(amount) {
        Ok(())
    } else {
        Err(CoreError::InvalidInput(format!(
            "amount {amount} must be non-negative with at most two fraction digits"
        )))
    }
}
