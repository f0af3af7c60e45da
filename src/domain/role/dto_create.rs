/// Payload for creating or updating a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleDto {
    pub name: String,
    pub is_not_editable: bool,
}
