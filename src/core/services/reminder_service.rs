//! Payment reminder storage and the due-query consumed by the external
//! notification poller.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{PaymentReminder, Session};
use crate::errors::CoreError;
use crate::store::EntityStore;

use super::{authorize, ensure_valid_amount, require_admin, ServiceResult};

#[derive(Debug, Clone)]
pub struct NewReminder {
    pub description: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub days_before_due: u32,
    pub interval_days: u32,
    pub recurring: bool,
    pub budget_item_id: Option<Uuid>,
}

pub struct ReminderService;

impl ReminderService {
    pub fn create(
        store: &mut EntityStore,
        session: &Session,
        input: NewReminder,
    ) -> ServiceResult<Uuid> {
        authorize(store, session)?;
        require_admin(session)?;
        ensure_valid_amount(input.amount)?;
        let household = session.household_id;
        if input.description.trim().is_empty() {
            return Err(CoreError::InvalidInput("description is required".into()));
        }
        if let Some(item_id) = input.budget_item_id {
            if store.budget_item(household, item_id).is_none() {
                return Err(CoreError::NotFoundOrUnauthorized("budget item"));
            }
        }
        let mut reminder = PaymentReminder::new(
            household,
            input.description,
            input.amount,
            input.due_date,
            input.days_before_due,
        );
        reminder.interval_days = input.interval_days;
        reminder.recurring = input.recurring;
        reminder.budget_item_id = input.budget_item_id;
        let id = reminder.id;
        store.reminders.push(reminder);
        Ok(id)
    }

    /// Reminders whose notification window is open on `today`.
    pub fn due(
        store: &EntityStore,
        session: &Session,
        today: NaiveDate,
    ) -> ServiceResult<Vec<PaymentReminder>> {
        authorize(store, session)?;
        Ok(store
            .reminders_for(session.household_id)
            .into_iter()
            .filter(|r| r.due_on(today))
            .cloned()
            .collect())
    }

    pub fn mark_notified(
        store: &mut EntityStore,
        session: &Session,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> ServiceResult<()> {
        authorize(store, session)?;
        let reminder = store
            .reminder_mut(session.household_id, id)
            .ok_or(CoreError::NotFoundOrUnauthorized("payment reminder"))?;
        reminder.mark_notified(now);
        Ok(())
    }

    pub fn delete(store: &mut EntityStore, session: &Session, id: Uuid) -> ServiceResult<()> {
        authorize(store, session)?;
        require_admin(session)?;
        let household = session.household_id;
        if store.reminder(household, id).is_none() {
            return Err(CoreError::NotFoundOrUnauthorized("payment reminder"));
        }
        store
            .reminders
            .retain(|r| !(r.household_id == household && r.id == id));
        Ok(())
    }

    pub fn list(store: &EntityStore, session: &Session) -> ServiceResult<Vec<PaymentReminder>> {
        authorize(store, session)?;
        Ok(store
            .reminders_for(session.household_id)
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Household;
    use rust_decimal_macros::dec;

    fn seeded() -> (EntityStore, Session) {
        let mut store = EntityStore::new();
        let user = Uuid::new_v4();
        let household = Household::new("Sharma", user);
        let session = Session::admin(user, household.id);
        store.households.push(household);
        (store, session)
    }

    fn reminder_due(day: u32) -> NewReminder {
        NewReminder {
            description: "Rent".into(),
            amount: dec!(1500.00),
            due_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            days_before_due: 3,
            interval_days: 1,
            recurring: false,
            budget_item_id: None,
        }
    }

    #[test]
    fn due_query_respects_the_lead_window() {
        let (mut store, session) = seeded();
        ReminderService::create(&mut store, &session, reminder_due(10)).unwrap();
        ReminderService::create(&mut store, &session, reminder_due(25)).unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let due = ReminderService::due(&store, &session, today).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].due_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn notified_reminders_drop_out_of_the_due_query() {
        let (mut store, session) = seeded();
        let id = ReminderService::create(&mut store, &session, reminder_due(10)).unwrap();
        ReminderService::mark_notified(&mut store, &session, id, Utc::now()).unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        assert!(ReminderService::due(&store, &session, today).unwrap().is_empty());
    }
}
