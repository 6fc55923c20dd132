use uuid::Uuid;

use crate::domain::{Category, CategoryKind, Session};
use crate::errors::CoreError;
use crate::store::EntityStore;

use super::{authorize, require_admin, ServiceResult};

/// Categories are immutable once created; only create, list, and a
/// referentially restricted delete are offered.
pub struct CategoryService;

impl CategoryService {
    pub fn create(
        store: &mut EntityStore,
        session: &Session,
        name: &str,
        kind: CategoryKind,
    ) -> ServiceResult<Uuid> {
        authorize(store, session)?;
        require_admin(session)?;
        let household = session.household_id;
        let normalized = name.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(CoreError::InvalidInput("category name is required".into()));
        }
        if store
            .categories_for(household)
            .into_iter()
            .any(|c| c.name.trim().to_lowercase() == normalized)
        {
            return Err(CoreError::InvalidInput(format!(
                "category `{name}` already exists"
            )));
        }
        let category = Category::new(household, name.trim(), kind);
        let id = category.id;
        store.categories.push(category);
        tracing::info!(category_id = %id, %kind, "category created");
        Ok(id)
    }

    pub fn delete(store: &mut EntityStore, session: &Session, id: Uuid) -> ServiceResult<()> {
        authorize(store, session)?;
        require_admin(session)?;
        let household = session.household_id;
        if store.category(household, id).is_none() {
            return Err(CoreError::NotFoundOrUnauthorized("category"));
        }
        let conflict = if store
            .budget_items
            .iter()
            .any(|i| i.household_id == household && i.category_id == id)
        {
            Some("budget items")
        } else if store
            .transactions
            .iter()
            .any(|t| t.household_id == household && t.category_id == id)
        {
            Some("transactions")
        } else if store
            .templates
            .iter()
            .any(|t| t.household_id == household && t.category_id == id)
        {
            Some("expense templates")
        } else {
            None
        };
        if let Some(conflict) = conflict {
            return Err(CoreError::ReferentialConflict {
                entity: "category",
                conflict,
            });
        }
        store
            .categories
            .retain(|c| !(c.household_id == household && c.id == id));
        Ok(())
    }

    pub fn list(store: &EntityStore, session: &Session) -> ServiceResult<Vec<Category>> {
        authorize(store, session)?;
        Ok(store
            .categories_for(session.household_id)
            .into_iter()
            .cloned()
            .collect())
    }
}
