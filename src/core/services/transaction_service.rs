//! Recording and maintaining actual spend.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{Month, Session, Transaction};
use crate::errors::CoreError;
use crate::store::EntityStore;

use super::{authorize, ensure_valid_amount, ServiceResult};

/// Fields accepted when recording or replacing a transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub occurred_at: DateTime<Utc>,
    pub description: String,
    pub amount: Decimal,
    pub category_id: Uuid,
    pub paid_from_account_id: Uuid,
    pub notes: Option<String>,
    /// `Some` links the spend to a budget item of the same household.
    pub budget_item_id: Option<Uuid>,
}

/// Members as well as admins may record spend.
pub struct TransactionService;

impl TransactionService {
    pub fn record(
        store: &mut EntityStore,
        session: &Session,
        input: NewTransaction,
    ) -> ServiceResult<Uuid> {
        authorize(store, session)?;
        Self::validate(store, session.household_id, &input)?;
        let mut txn = Transaction::new(
            session.household_id,
            input.occurred_at,
            input.description,
            input.amount,
            input.category_id,
            input.paid_from_account_id,
        );
        txn.notes = input.notes;
        txn.budget_item_id = input.budget_item_id;
        let id = txn.id;
        store.transactions.push(txn);
        tracing::info!(transaction_id = %id, "transaction recorded");
        Ok(id)
    }

    /// Replaces every mutable field of an existing transaction.
    pub fn update(
        store: &mut EntityStore,
        session: &Session,
        id: Uuid,
        input: NewTransaction,
    ) -> ServiceResult<()> {
        authorize(store, session)?;
        let household = session.household_id;
        Self::validate(store, household, &input)?;
        let txn = store
            .transaction_mut(household, id)
            .ok_or(CoreError::NotFoundOrUnauthorized("transaction"))?;
        txn.occurred_at = input.occurred_at;
        txn.description = input.description;
        txn.amount = input.amount;
        txn.category_id = input.category_id;
        txn.paid_from_account_id = input.paid_from_account_id;
        txn.notes = input.notes;
        txn.budget_item_id = input.budget_item_id;
        Ok(())
    }

    pub fn remove(
        store: &mut EntityStore,
        session: &Session,
        id: Uuid,
    ) -> ServiceResult<Transaction> {
        authorize(store, session)?;
        let household = session.household_id;
        let removed = store
            .transaction(household, id)
            .cloned()
            .ok_or(CoreError::NotFoundOrUnauthorized("transaction"))?;
        store
            .transactions
            .retain(|t| !(t.household_id == household && t.id == id));
        Ok(removed)
    }

    pub fn list_for_month(
        store: &EntityStore,
        session: &Session,
        month: Month,
    ) -> ServiceResult<Vec<Transaction>> {
        authorize(store, session)?;
        let (start, end) = month.utc_range();
        Ok(store
            .transactions_between(session.household_id, start, end)
            .into_iter()
            .cloned()
            .collect())
    }

    fn validate(
        store: &EntityStore,
        household: Uuid,
        input: &NewTransaction,
    ) -> ServiceResult<()> {
        ensure_valid_amount(input.amount)?;
        if input.description.trim().is_empty() {
            return Err(CoreError::InvalidInput("description is required".into()));
        }
        if store.category(household, input.category_id).is_none() {
            return Err(CoreError::NotFoundOrUnauthorized("category"));
        }
        if store
            .account(household, input.paid_from_account_id)
            .is_none()
        {
            return Err(CoreError::NotFoundOrUnauthorized("payment account"));
        }
        if let Some(item_id) = input.budget_item_id {
            if store.budget_item(household, item_id).is_none() {
                return Err(CoreError::NotFoundOrUnauthorized("budget item"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetItem, Category, CategoryKind, Household, PaymentAccount};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    struct Fixture {
        store: EntityStore,
        session: Session,
        category: Uuid,
        account: Uuid,
    }

    fn fixture() -> Fixture {
        let mut store = EntityStore::new();
        let user = Uuid::new_v4();
        let household = Household::new("Sharma", user);
        let session = Session::member(user, household.id);
        let category = Category::new(household.id, "Groceries", CategoryKind::Periodic);
        let account = PaymentAccount::new(household.id, "Primary Account");
        let (category_id, account_id) = (category.id, account.id);
        store.households.push(household);
        store.categories.push(category);
        store.accounts.push(account);
        Fixture {
            store,
            session,
            category: category_id,
            account: account_id,
        }
    }

    fn input(f: &Fixture) -> NewTransaction {
        NewTransaction {
            occurred_at: Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap(),
            description: "Vegetables".into(),
            amount: dec!(250.00),
            category_id: f.category,
            paid_from_account_id: f.account,
            notes: None,
            budget_item_id: None,
        }
    }

    #[test]
    fn members_can_record_spend() {
        let mut f = fixture();
        let txn = input(&f);
        let id = TransactionService::record(&mut f.store, &f.session, txn).unwrap();
        assert!(f.store.transaction(f.session.household_id, id).is_some());
    }

    #[test]
    fn link_to_foreign_budget_item_is_rejected() {
        let mut f = fixture();
        let mut bad = input(&f);
        // Item exists, but under a different household.
        let foreign_item = BudgetItem::new(
            Uuid::new_v4(),
            "2024-01".parse().unwrap(),
            "Rent",
            dec!(1500.00),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        bad.budget_item_id = Some(foreign_item.id);
        f.store.budget_items.push(foreign_item);

        let err = TransactionService::record(&mut f.store, &f.session, bad)
            .expect_err("foreign link must be invisible");
        assert!(matches!(
            err,
            CoreError::NotFoundOrUnauthorized("budget item")
        ));
        assert!(f.store.transactions.is_empty());
    }

    #[test]
    fn month_listing_uses_the_half_open_range() {
        let mut f = fixture();
        let mut on_boundary = input(&f);
        on_boundary.occurred_at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let in_january = input(&f);
        TransactionService::record(&mut f.store, &f.session, in_january).unwrap();
        TransactionService::record(&mut f.store, &f.session, on_boundary).unwrap();

        let january = TransactionService::list_for_month(
            &f.store,
            &f.session,
            "2024-01".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(january.len(), 1, "midnight of the next month is excluded");
    }

    #[test]
    fn remove_returns_the_deleted_row() {
        let mut f = fixture();
        let txn = input(&f);
        let id = TransactionService::record(&mut f.store, &f.session, txn).unwrap();
        let removed = TransactionService::remove(&mut f.store, &f.session, id).unwrap();
        assert_eq!(removed.id, id);
        assert!(f.store.transaction(f.session.household_id, id).is_none());
    }
}
