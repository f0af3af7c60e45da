//! Role DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreateRoleDto, Role};
use crate::shared::validate_not_blank;

/// Role API representation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleDto {
    pub guid: String,
    pub name: String,
    pub is_not_editable: bool,
}

impl From<Role> for RoleDto {
    fn from(r: Role) -> Self {
        Self {
            guid: r.guid,
            name: r.name,
            is_not_editable: r.is_not_editable,
        }
    }
}

/// Create or update role request data
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    #[validate(
        length(min = 1, max = 100, message = "name must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[serde(default)]
    pub is_not_editable: bool,
}

impl From<CreateRoleRequest> for CreateRoleDto {
    fn from(r: CreateRoleRequest) -> Self {
        Self {
            name: r.name.trim().to_string(),
            is_not_editable: r.is_not_editable,
        }
    }
}
