//! Expense templates and the derived "in use" resolution.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{ExpenseTemplate, Session};
use crate::errors::CoreError;
use crate::store::EntityStore;

use super::{authorize, ensure_valid_amount, require_admin, ServiceResult};

pub struct TemplateService;

impl TemplateService {
    pub fn create(
        store: &mut EntityStore,
        session: &Session,
        description: &str,
        amount: Decimal,
        category_id: Uuid,
        account_id: Uuid,
    ) -> ServiceResult<Uuid> {
        authorize(store, session)?;
        require_admin(session)?;
        ensure_valid_amount(amount)?;
        let household = session.household_id;
        if description.trim().is_empty() {
            return Err(CoreError::InvalidInput("description is required".into()));
        }
        if store.category(household, category_id).is_none() {
            return Err(CoreError::NotFoundOrUnauthorized("category"));
        }
        if store.account(household, account_id).is_none() {
            return Err(CoreError::NotFoundOrUnauthorized("payment account"));
        }
        let template =
            ExpenseTemplate::new(household, description.trim(), amount, category_id, account_id);
        let id = template.id;
        store.templates.push(template);
        Ok(id)
    }

    /// Derived check: a template is in use while a value-identical budget item
    /// exists in the same household. Not a foreign key — two value-identical
    /// templates are indistinguishable here.
    pub fn is_in_use(
        store: &EntityStore,
        session: &Session,
        template_id: Uuid,
    ) -> ServiceResult<bool> {
        authorize(store, session)?;
        let template = store
            .template(session.household_id, template_id)
            .ok_or(CoreError::NotFoundOrUnauthorized("expense template"))?;
        Ok(store.budget_items.iter().any(|item| template.matches(item)))
    }

    pub fn update(
        store: &mut EntityStore,
        session: &Session,
        template_id: Uuid,
        description: &str,
        amount: Decimal,
        category_id: Uuid,
        account_id: Uuid,
    ) -> ServiceResult<()> {
        authorize(store, session)?;
        require_admin(session)?;
        ensure_valid_amount(amount)?;
        if Self::is_in_use(store, session, template_id)? {
            return Err(CoreError::ReferentialConflict {
                entity: "expense template",
                conflict: "budget items",
            });
        }
        let household = session.household_id;
        if store.category(household, category_id).is_none() {
            return Err(CoreError::NotFoundOrUnauthorized("category"));
        }
        if store.account(household, account_id).is_none() {
            return Err(CoreError::NotFoundOrUnauthorized("payment account"));
        }
        let template = store
            .template_mut(household, template_id)
            .ok_or(CoreError::NotFoundOrUnauthorized("expense template"))?;
        template.description = description.trim().to_string();
        template.amount = amount;
        template.category_id = category_id;
        template.account_id = account_id;
        Ok(())
    }

    pub fn delete(
        store: &mut EntityStore,
        session: &Session,
        template_id: Uuid,
    ) -> ServiceResult<()> {
        authorize(store, session)?;
        require_admin(session)?;
        if Self::is_in_use(store, session, template_id)? {
            return Err(CoreError::ReferentialConflict {
                entity: "expense template",
                conflict: "budget items",
            });
        }
        let household = session.household_id;
        store
            .templates
            .retain(|t| !(t.household_id == household && t.id == template_id));
        Ok(())
    }

    pub fn list(store: &EntityStore, session: &Session) -> ServiceResult<Vec<ExpenseTemplate>> {
        authorize(store, session)?;
        Ok(store
            .templates_for(session.household_id)
            .into_iter()
            .cloned()
            .collect())
    }
}
