use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{HouseholdScoped, Identifiable};

/// Upcoming-payment reminder. Delivery is an externally triggered polling job;
/// the core only stores reminders, answers the due-query, and records
/// notification state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentReminder {
    pub id: Uuid,
    pub household_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_item_id: Option<Uuid>,
    pub description: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    /// Days before `due_date` at which the reminder window opens.
    pub days_before_due: u32,
    /// Minimum gap between repeated notifications for the same reminder.
    pub interval_days: u32,
    pub recurring: bool,
    pub notified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_notified_at: Option<DateTime<Utc>>,
}

impl PaymentReminder {
    pub fn new(
        household_id: Uuid,
        description: impl Into<String>,
        amount: Decimal,
        due_date: NaiveDate,
        days_before_due: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            household_id,
            budget_item_id: None,
            description: description.into(),
            amount,
            due_date,
            days_before_due,
            interval_days: 1,
            recurring: false,
            notified: false,
            last_notified_at: None,
        }
    }

    /// Whether the reminder should surface on `today`: the lead window has
    /// opened, the caller has not been notified yet (or the re-notify interval
    /// has elapsed for recurring reminders).
    pub fn due_on(&self, today: NaiveDate) -> bool {
        let window_start = self.due_date - Duration::days(i64::from(self.days_before_due));
        if today < window_start {
            return false;
        }
        match (self.notified, self.last_notified_at) {
            (false, _) => true,
            (true, Some(last)) if self.recurring => {
                let elapsed = today - last.date_naive();
                elapsed >= Duration::days(i64::from(self.interval_days))
            }
            (true, _) => false,
        }
    }

    pub fn mark_notified(&mut self, now: DateTime<Utc>) {
        self.notified = true;
        self.last_notified_at = Some(now);
    }
}

impl Identifiable for PaymentReminder {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl HouseholdScoped for PaymentReminder {
    fn household_id(&self) -> Uuid {
        self.household_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn reminder() -> PaymentReminder {
        PaymentReminder::new(
            Uuid::new_v4(),
            "Rent",
            dec!(1500.00),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            3,
        )
    }

    #[test]
    fn due_only_inside_lead_window() {
        let reminder = reminder();
        assert!(!reminder.due_on(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()));
        assert!(reminder.due_on(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()));
        assert!(reminder.due_on(NaiveDate::from_ymd_opt(2024, 1, 12).unwrap()));
    }

    #[test]
    fn notified_reminder_stays_quiet_unless_recurring() {
        let mut reminder = reminder();
        let now = Utc::now();
        reminder.mark_notified(now);
        assert!(!reminder.due_on(NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()));

        reminder.recurring = true;
        reminder.interval_days = 2;
        let again = now.date_naive() + Duration::days(2);
        assert!(reminder.due_on(again));
    }
}
