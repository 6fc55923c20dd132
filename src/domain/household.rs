use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Identifiable;

/// Tenant boundary. All records and access control are scoped to one household.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Household {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Household {
    pub fn new(name: impl Into<String>, created_by: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_by,
            created_at: Utc::now(),
        }
    }
}

impl Identifiable for Household {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Caller role within a household.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
}

/// Identity resolved by the session layer for the current caller. The core
/// never reads a session from ambient state; every service function takes one
/// explicitly.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub user_id: Uuid,
    pub household_id: Uuid,
    pub role: Role,
}

impl Session {
    pub fn admin(user_id: Uuid, household_id: Uuid) -> Self {
        Self {
            user_id,
            household_id,
            role: Role::Admin,
        }
    }

    pub fn member(user_id: Uuid, household_id: Uuid) -> Self {
        Self {
            user_id,
            household_id,
            role: Role::Member,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}
