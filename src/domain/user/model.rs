use crate::domain::{AuditInfo, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    /// Stable external identifier exposed to clients.
    pub guid: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub password_salt: String,
    pub role: Role,
    pub is_deleted: bool,
    pub is_test_user: bool,
    pub audit: AuditInfo,
}

impl User {
    /// Users created without a password cannot log in until one is set.
    pub fn has_password(&self) -> bool {
        !self.password_hash.is_empty()
    }
}
