//! User management API handlers
//!
//! Delegates to the `UserServicePort` / `RoleServicePort` implementations
//! from the application/identity layer.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{CreateUserRequest, UpdateUserPasswordRequest, UpdateUserRequest, UserDto};
use crate::domain::{CreateUserDto, RoleServicePort, User, UserServicePort};
use crate::interfaces::http::common::{
    require_guid, ApiError, ApiResult, BaseResponse, DataRequest, EmptyData, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// User handler state
#[derive(Clone)]
pub struct UserHandlerState {
    pub users: Arc<dyn UserServicePort>,
    pub roles: Arc<dyn RoleServicePort>,
}

impl UserHandlerState {
    /// Active user by guid, 404 when absent.
    async fn find_user(&self, guid: &str) -> Result<User, ApiError> {
        self.users
            .get_user_by_guid(guid)
            .await?
            .ok_or(ApiError::NotFound)
    }
}

#[utoipa::path(
    get,
    path = "/user/{guid}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("guid" = String, Path, description = "User guid")),
    responses(
        (status = 200, description = "User details", body = BaseResponse<UserDto>),
        (status = 400, description = "Request is not well formed", body = BaseResponse<EmptyData>),
        (status = 404, description = "Not found"),
        (status = 500, description = "Unexpected error", body = BaseResponse<EmptyData>)
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(guid): Path<String>,
) -> ApiResult<UserDto> {
    require_guid(&guid)?;
    let user = state.find_user(&guid).await?;
    Ok(Json(BaseResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = DataRequest<CreateUserRequest>,
    responses(
        (status = 200, description = "User created", body = BaseResponse<UserDto>),
        (status = 400, description = "Invalid email, role not found or not created", body = BaseResponse<EmptyData>),
        (status = 500, description = "Unexpected error", body = BaseResponse<EmptyData>)
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    caller: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<UserDto> {
    if !state.users.check_email_valid(&request.email, "").await? {
        return Err(ApiError::bad_request("Invalid email"));
    }

    let role_guid = request.role_guid.as_deref().unwrap_or_default();
    let Some(role) = state.roles.get_role_for_user(role_guid).await? else {
        return Err(ApiError::bad_request("Role not found"));
    };

    let user = state
        .users
        .create_user(CreateUserDto::from(&request), role, caller.actor())
        .await?
        .ok_or_else(|| ApiError::bad_request("Not created"))?;

    Ok(Json(BaseResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    put,
    path = "/user/{guid}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("guid" = String, Path, description = "User guid")),
    request_body = DataRequest<UpdateUserRequest>,
    responses(
        (status = 200, description = "User updated", body = BaseResponse<UserDto>),
        (status = 400, description = "Invalid email", body = BaseResponse<EmptyData>),
        (status = 404, description = "Not found"),
        (status = 500, description = "Unexpected error", body = BaseResponse<EmptyData>)
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Path(guid): Path<String>,
    caller: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserDto> {
    require_guid(&guid)?;
    let user = state.find_user(&guid).await?;

    if !state.users.check_email_valid(&request.email, &user.guid).await? {
        return Err(ApiError::bad_request("Invalid email"));
    }

    let user = state
        .users
        .update_user(request.into(), user, caller.actor())
        .await?;
    Ok(Json(BaseResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    put,
    path = "/user/{guid}/password",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("guid" = String, Path, description = "User guid")),
    request_body = DataRequest<UpdateUserPasswordRequest>,
    responses(
        (status = 200, description = "Password changed", body = BaseResponse<UserDto>),
        (status = 400, description = "Request is not well formed", body = BaseResponse<EmptyData>),
        (status = 404, description = "Not found"),
        (status = 500, description = "Unexpected error", body = BaseResponse<EmptyData>)
    )
)]
pub async fn update_user_password(
    State(state): State<UserHandlerState>,
    Path(guid): Path<String>,
    caller: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<UpdateUserPasswordRequest>,
) -> ApiResult<UserDto> {
    require_guid(&guid)?;
    let user = state.find_user(&guid).await?;

    let user = state
        .users
        .update_user_password(user, &request.password, caller.actor())
        .await?;
    Ok(Json(BaseResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    put,
    path = "/user/{guid}/role/{role_guid}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("guid" = String, Path, description = "User guid"),
        ("role_guid" = String, Path, description = "Role guid")
    ),
    responses(
        (status = 200, description = "Role assigned", body = BaseResponse<UserDto>),
        (status = 400, description = "Role not found", body = BaseResponse<EmptyData>),
        (status = 404, description = "Not found"),
        (status = 500, description = "Unexpected error", body = BaseResponse<EmptyData>)
    )
)]
pub async fn update_user_role(
    State(state): State<UserHandlerState>,
    Path((guid, role_guid)): Path<(String, String)>,
    caller: AuthenticatedUser,
) -> ApiResult<UserDto> {
    require_guid(&guid)?;
    require_guid(&role_guid)?;
    let user = state.find_user(&guid).await?;

    let Some(role) = state.roles.get_role_by_guid(&role_guid).await? else {
        return Err(ApiError::bad_request("Role not found"));
    };

    let user = state
        .users
        .update_user_role(user, role, caller.actor())
        .await?;
    Ok(Json(BaseResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    delete,
    path = "/user/{guid}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("guid" = String, Path, description = "User guid")),
    responses(
        (status = 200, description = "User deleted", body = BaseResponse<EmptyData>),
        (status = 404, description = "Not found"),
        (status = 500, description = "Unexpected error", body = BaseResponse<EmptyData>)
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Path(guid): Path<String>,
    caller: AuthenticatedUser,
) -> ApiResult<EmptyData> {
    require_guid(&guid)?;
    let user = state.find_user(&guid).await?;

    if state.users.delete_user(user, caller.actor()).await? {
        Ok(Json(BaseResponse::empty()))
    } else {
        Err(ApiError::Internal("User not deleted".into()))
    }
}
