//! Budget items: planned spend for a month, plus the month-to-month copy.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{BudgetItem, Month, Session};
use crate::errors::CoreError;
use crate::store::EntityStore;

use super::{authorize, ensure_valid_amount, require_admin, ServiceResult};

/// Fields accepted when creating or replacing a budget item.
#[derive(Debug, Clone)]
pub struct NewBudgetItem {
    pub month: Month,
    pub description: String,
    pub amount: Decimal,
    pub category_id: Uuid,
    pub account_id: Uuid,
    pub color_tag: Option<String>,
}

pub struct BudgetService;

impl BudgetService {
    pub fn create_item(
        store: &mut EntityStore,
        session: &Session,
        input: NewBudgetItem,
    ) -> ServiceResult<Uuid> {
        authorize(store, session)?;
        require_admin(session)?;
        Self::validate(store, session.household_id, &input)?;
        let mut item = BudgetItem::new(
            session.household_id,
            input.month,
            input.description,
            input.amount,
            input.category_id,
            input.account_id,
        );
        item.color_tag = input.color_tag;
        let id = item.id;
        store.budget_items.push(item);
        tracing::info!(budget_item_id = %id, month = %input.month, "budget item created");
        Ok(id)
    }

    pub fn update_item(
        store: &mut EntityStore,
        session: &Session,
        id: Uuid,
        input: NewBudgetItem,
    ) -> ServiceResult<()> {
        authorize(store, session)?;
        require_admin(session)?;
        let household = session.household_id;
        Self::validate(store, household, &input)?;
        let item = store
            .budget_items
            .iter_mut()
            .find(|i| i.household_id == household && i.id == id)
            .ok_or(CoreError::NotFoundOrUnauthorized("budget item"))?;
        item.month = input.month;
        item.description = input.description;
        item.amount = input.amount;
        item.category_id = input.category_id;
        item.account_id = input.account_id;
        item.color_tag = input.color_tag;
        Ok(())
    }

    /// Hard delete. Transactions linked to the item keep their rows with the
    /// link nulled; they become unplanned spend.
    pub fn delete_item(store: &mut EntityStore, session: &Session, id: Uuid) -> ServiceResult<()> {
        authorize(store, session)?;
        require_admin(session)?;
        let household = session.household_id;
        if store.budget_item(household, id).is_none() {
            return Err(CoreError::NotFoundOrUnauthorized("budget item"));
        }
        store.transact(|tx| {
            tx.budget_items
                .retain(|i| !(i.household_id == household && i.id == id));
            for txn in tx
                .transactions
                .iter_mut()
                .filter(|t| t.household_id == household && t.budget_item_id == Some(id))
            {
                txn.budget_item_id = None;
            }
            Ok(())
        })?;
        tracing::info!(budget_item_id = %id, "budget item deleted, links nulled");
        Ok(())
    }

    pub fn items_for_month(
        store: &EntityStore,
        session: &Session,
        month: Month,
    ) -> ServiceResult<Vec<BudgetItem>> {
        authorize(store, session)?;
        Ok(store
            .budget_items_for(session.household_id, month)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Copies every budget item from `source` into `target`, which must be
    /// empty. Returns the number of items copied.
    ///
    /// The emptiness check and the inserts share one transactional write, so
    /// two concurrent copies into the same month cannot both observe an empty
    /// target through this store.
    pub fn copy_budget_from_month(
        store: &mut EntityStore,
        session: &Session,
        source: Month,
        target: Month,
    ) -> ServiceResult<usize> {
        authorize(store, session)?;
        require_admin(session)?;
        if source == target {
            return Err(CoreError::InvalidInput(
                "source and target months must differ".into(),
            ));
        }
        let household = session.household_id;
        let count = store.transact(|tx| {
            if !tx.budget_items_for(household, target).is_empty() {
                return Err(CoreError::TargetNotEmpty(target));
            }
            let clones: Vec<BudgetItem> = tx
                .budget_items_for(household, source)
                .into_iter()
                .map(|item| item.clone_into(target))
                .collect();
            if clones.is_empty() {
                return Err(CoreError::SourceEmpty(source));
            }
            let count = clones.len();
            tx.budget_items.extend(clones);
            Ok(count)
        })?;
        tracing::info!(%source, %target, count, "budget copied across months");
        Ok(count)
    }

    fn validate(
        store: &EntityStore,
        household: Uuid,
        input: &NewBudgetItem,
    ) -> ServiceResult<()> {
        ensure_valid_amount(input.amount)?;
        if input.description.trim().is_empty() {
            return Err(CoreError::InvalidInput("description is required".into()));
        }
        if store.category(household, input.category_id).is_none() {
            return Err(CoreError::NotFoundOrUnauthorized("category"));
        }
        if store.account(household, input.account_id).is_none() {
            return Err(CoreError::NotFoundOrUnauthorized("payment account"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, CategoryKind, Household, PaymentAccount, Transaction};
    use chrono::{TimeZone, Utc};
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
        let session = Session::admin(user, household.id);
        let category = Category::new(household.id, "Housing", CategoryKind::Mandatory);
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

    fn item(f: &Fixture, month: &str, description: &str, amount: Decimal) -> NewBudgetItem {
        NewBudgetItem {
            month: month.parse().unwrap(),
            description: description.into(),
            amount,
            category_id: f.category,
            account_id: f.account,
            color_tag: None,
        }
    }

    #[test]
    fn delete_nulls_transaction_links_instead_of_cascading() {
        let mut f = fixture();
        let rent = item(&f, "2024-01", "Rent", dec!(1500.00));
        let id = BudgetService::create_item(&mut f.store, &f.session, rent).unwrap();
        let txn = Transaction::new(
            f.session.household_id,
            Utc.with_ymd_and_hms(2024, 1, 3, 8, 0, 0).unwrap(),
            "January rent",
            dec!(1500.00),
            f.category,
            f.account,
        )
        .with_budget_item(id);
        let txn_id = txn.id;
        f.store.transactions.push(txn);

        BudgetService::delete_item(&mut f.store, &f.session, id).unwrap();
        let survivor = f.store.transaction(f.session.household_id, txn_id).unwrap();
        assert_eq!(survivor.budget_item_id, None);
        assert!(f.store.budget_items.is_empty());
    }

    #[test]
    fn copy_clones_items_with_fresh_identities() {
        let mut f = fixture();
        for (description, amount) in [
            ("Rent", dec!(1500.00)),
            ("Electricity", dec!(120.00)),
            ("Internet", dec!(60.00)),
            ("Water", dec!(30.00)),
        ] {
            let new_item = item(&f, "2024-01", description, amount);
            BudgetService::create_item(&mut f.store, &f.session, new_item).unwrap();
        }

        let copied = BudgetService::copy_budget_from_month(
            &mut f.store,
            &f.session,
            "2024-01".parse().unwrap(),
            "2024-02".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(copied, 4);

        let source = BudgetService::items_for_month(&f.store, &f.session, "2024-01".parse().unwrap())
            .unwrap();
        let target = BudgetService::items_for_month(&f.store, &f.session, "2024-02".parse().unwrap())
            .unwrap();
        assert_eq!(target.len(), 4);
        for clone in &target {
            let original = source
                .iter()
                .find(|i| i.description == clone.description)
                .expect("clone matches a source item");
            assert_ne!(original.id, clone.id, "identity must be fresh");
            assert_eq!(original.amount, clone.amount);
            assert_eq!(original.category_id, clone.category_id);
            assert_eq!(original.account_id, clone.account_id);
        }
    }

    #[test]
    fn copy_refuses_a_non_empty_target() {
        let mut f = fixture();
        let january = item(&f, "2024-01", "Rent", dec!(1500.00));
        BudgetService::create_item(&mut f.store, &f.session, january).unwrap();
        let february = item(&f, "2024-02", "Rent", dec!(1500.00));
        BudgetService::create_item(&mut f.store, &f.session, february).unwrap();

        let err = BudgetService::copy_budget_from_month(
            &mut f.store,
            &f.session,
            "2024-01".parse().unwrap(),
            "2024-02".parse().unwrap(),
        )
        .expect_err("target has an item");
        assert!(matches!(err, CoreError::TargetNotEmpty(_)));
        let target = BudgetService::items_for_month(&f.store, &f.session, "2024-02".parse().unwrap())
            .unwrap();
        assert_eq!(target.len(), 1, "failed copy writes nothing");
    }

    #[test]
    fn copy_refuses_an_empty_source() {
        let mut f = fixture();
        let err = BudgetService::copy_budget_from_month(
            &mut f.store,
            &f.session,
            "2024-01".parse().unwrap(),
            "2024-02".parse().unwrap(),
        )
        .expect_err("source has no items");
        assert!(matches!(err, CoreError::SourceEmpty(_)));
        assert!(f.store.budget_items.is_empty());
    }
}
