//! Multi-month reporting over the monthly aggregator.

use crate::domain::{Month, MonthlySummary, Session};
use crate::store::EntityStore;

use super::dashboard_service::DashboardService;
use super::{authorize, ServiceResult};

pub struct ReportService;

impl ReportService {
    /// Runs the monthly aggregation once per requested month and flattens each
    /// snapshot into a summary row. Input order is preserved, nothing is
    /// cached, and trend deltas are left to the caller.
    pub fn multi_month_report(
        store: &EntityStore,
        session: &Session,
        months: &[Month],
    ) -> ServiceResult<Vec<MonthlySummary>> {
        authorize(store, session)?;
        months
            .iter()
            .map(|&month| {
                DashboardService::dashboard(store, session, month)
                    .map(|snapshot| MonthlySummary::from_snapshot(&snapshot))
            })
            .collect()
    }
}
