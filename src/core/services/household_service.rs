use uuid::Uuid;

use crate::config::Config;
use crate::domain::{Household, PaymentAccount, Session};
use crate::errors::CoreError;
use crate::store::EntityStore;

use super::{authorize, require_admin, ServiceResult};

pub struct HouseholdService;

impl HouseholdService {
    /// Registers a household together with its default payment account in one
    /// all-or-nothing write, returning an admin session for the creator.
    pub fn register(
        store: &mut EntityStore,
        config: &Config,
        name: &str,
        creator: Uuid,
    ) -> ServiceResult<Session> {
        if name.trim().is_empty() {
            return Err(CoreError::InvalidInput("household name is required".into()));
        }
        let household = Household::new(name.trim(), creator);
        let household_id = household.id;
        let default_account_name = config.default_account_name.clone();
        store.transact(|tx| {
            tx.accounts
                .push(PaymentAccount::new(household_id, default_account_name));
            tx.households.push(household);
            Ok(())
        })?;
        tracing::info!(%household_id, "household registered with default account");
        Ok(Session::admin(creator, household_id))
    }

    /// The only permitted household mutation.
    pub fn rename(store: &mut EntityStore, session: &Session, name: &str) -> ServiceResult<()> {
        authorize(store, session)?;
        require_admin(session)?;
        if name.trim().is_empty() {
            return Err(CoreError::InvalidInput("household name is required".into()));
        }
        let household = store
            .household_mut(session.household_id)
            .ok_or(CoreError::Unauthorized)?;
        household.name = name.trim().to_string();
        Ok(())
    }
}
