use uuid::Uuid;

use crate::domain::{PaymentAccount, Session};
use crate::errors::CoreError;
use crate::store::EntityStore;

use super::{authorize, require_admin, ServiceResult};

pub struct AccountService;

impl AccountService {
    pub fn create(
        store: &mut EntityStore,
        session: &Session,
        name: &str,
    ) -> ServiceResult<Uuid> {
        authorize(store, session)?;
        require_admin(session)?;
        Self::validate_name(store, session.household_id, None, name)?;
        let account = PaymentAccount::new(session.household_id, name.trim());
        let id = account.id;
        store.accounts.push(account);
        tracing::info!(account_id = %id, "payment account created");
        Ok(id)
    }

    /// Renames an account. Refused while the account is referenced, matching
    /// the delete restriction.
    pub fn rename(
        store: &mut EntityStore,
        session: &Session,
        id: Uuid,
        name: &str,
    ) -> ServiceResult<()> {
        authorize(store, session)?;
        require_admin(session)?;
        let household = session.household_id;
        if store.account(household, id).is_none() {
            return Err(CoreError::NotFoundOrUnauthorized("payment account"));
        }
        Self::ensure_not_in_use(store, household, id)?;
        Self::validate_name(store, household, Some(id), name)?;
        if let Some(account) = store.account_mut(household, id) {
            account.name = name.trim().to_string();
        }
        Ok(())
    }

    pub fn delete(store: &mut EntityStore, session: &Session, id: Uuid) -> ServiceResult<()> {
        authorize(store, session)?;
        require_admin(session)?;
        let household = session.household_id;
        if store.account(household, id).is_none() {
            return Err(CoreError::NotFoundOrUnauthorized("payment account"));
        }
        Self::ensure_not_in_use(store, household, id)?;
        store
            .accounts
            .retain(|a| !(a.household_id == household && a.id == id));
        tracing::info!(account_id = %id, "payment account deleted");
        Ok(())
    }

    pub fn list(store: &EntityStore, session: &Session) -> ServiceResult<Vec<PaymentAccount>> {
        authorize(store, session)?;
        Ok(store
            .accounts_for(session.household_id)
            .into_iter()
            .cloned()
            .collect())
    }

    fn validate_name(
        store: &EntityStore,
        household: Uuid,
        exclude: Option<Uuid>,
        candidate: &str,
    ) -> ServiceResult<()> {
        let normalized = candidate.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(CoreError::InvalidInput("account name is required".into()));
        }
        let duplicate = store.accounts_for(household).into_iter().any(|account| {
            account.name.trim().to_lowercase() == normalized
                && exclude.map_or(true, |id| account.id != id)
        });
        if duplicate {
            Err(CoreError::InvalidInput(format!(
                "account `{candidate}` already exists"
            )))
        } else {
            Ok(())
        }
    }

    fn ensure_not_in_use(store: &EntityStore, household: Uuid, id: Uuid) -> ServiceResult<()> {
        let conflict = if store.allocations.iter().any(|a| a.account_id == id) {
            Some("fund allocations")
        } else if store
            .budget_items
            .iter()
            .any(|i| i.household_id == household && i.account_id == id)
        {
            Some("budget items")
        } else if store
            .transactions
            .iter()
            .any(|t| t.household_id == household && t.paid_from_account_id == id)
        {
            Some("transactions")
        } else if store
            .templates
            .iter()
            .any(|t| t.household_id == household && t.account_id == id)
        {
            Some("expense templates")
        } else {
            None
        };
        match conflict {
            Some(conflict) => Err(CoreError::ReferentialConflict {
                entity: "payment account",
                conflict,
            }),
            None => Ok(()),
        }
    }
}
