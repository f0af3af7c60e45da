use crate::domain::AuditInfo;

/// Role assigned to users that do not ask for a specific one.
pub const DEFAULT_ROLE_NAME: &str = "Default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub guid: String,
    pub name: String,
    /// System roles are frozen: updates return them unchanged.
    pub is_not_editable: bool,
    pub is_deleted: bool,
    pub audit: AuditInfo,
}
