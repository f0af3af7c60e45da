//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreateUserDto, UpdateUserDto, User};
use crate::interfaces::http::modules::roles::RoleDto;
use crate::shared::validate_password_strength;

/// User API representation. Credentials never leave the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub guid: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: RoleDto,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            guid: u.guid,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            role: RoleDto::from(u.role),
        }
    }
}

/// Create user request data
///
/// `roleGuid` is optional; without it the user gets the "Default" role.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub last_name: String,
    #[serde(default)]
    pub role_guid: Option<String>,
}

impl From<&CreateUserRequest> for CreateUserDto {
    fn from(r: &CreateUserRequest) -> Self {
        Self {
            email: r.email.clone(),
            first_name: r.first_name.clone(),
            last_name: r.last_name.clone(),
        }
    }
}

/// Update user profile request data
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub last_name: String,
}

impl From<UpdateUserRequest> for UpdateUserDto {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            email: r.email,
            first_name: r.first_name,
            last_name: r.last_name,
        }
    }
}

/// Password change request data
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserPasswordRequest {
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}
