use chrono::{DateTime, Utc};

/// Identity of whoever performs a mutation, stamped into audit columns.
///
/// `user_id == None` means the system itself (seeding, migrations).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Option<i32>,
}

impl Actor {
    pub fn system() -> Self {
        Self { user_id: None }
    }

    pub fn user(id: i32) -> Self {
        Self { user_id: Some(id) }
    }
}

/// Audit columns shared by every persisted entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditInfo {
    pub creation_time: DateTime<Utc>,
    pub creation_user_id: Option<i32>,
    pub update_time: Option<DateTime<Utc>>,
    pub update_user_id: Option<i32>,
    pub deletion_time: Option<DateTime<Utc>>,
    pub deletion_user_id: Option<i32>,
}

impl AuditInfo {
    pub fn created_by(actor: Actor, at: DateTime<Utc>) -> Self {
        Self {
            creation_time: at,
            creation_user_id: actor.user_id,
            update_time: None,
            update_user_id: None,
            deletion_time: None,
            deletion_user_id: None,
        }
    }
}
