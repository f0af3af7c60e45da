//! Role management API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{CreateRoleRequest, RoleDto};
use crate::domain::{CreateRoleDto, Role, RoleServicePort};
use crate::interfaces::http::common::{
    require_guid, ApiError, ApiResult, BaseResponse, DataRequest, EmptyData, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Role handler state
#[derive(Clone)]
pub struct RoleHandlerState {
    pub roles: Arc<dyn RoleServicePort>,
}

impl RoleHandlerState {
    async fn find_role(&self, guid: &str) -> Result<Role, ApiError> {
        self.roles
            .get_role_by_guid(guid)
            .await?
            .ok_or(ApiError::NotFound)
    }
}

#[utoipa::path(
    get,
    path = "/role/{guid}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("guid" = String, Path, description = "Role guid")),
    responses(
        (status = 200, description = "Role details", body = BaseResponse<RoleDto>),
        (status = 404, description = "Not found"),
        (status = 500, description = "Unexpected error", body = BaseResponse<EmptyData>)
    )
)]
pub async fn get_role(
    State(state): State<RoleHandlerState>,
    Path(guid): Path<String>,
) -> ApiResult<RoleDto> {
    require_guid(&guid)?;
    let role = state.find_role(&guid).await?;
    Ok(Json(BaseResponse::success(RoleDto::from(role))))
}

#[utoipa::path(
    post,
    path = "/role",
    tag = "Roles",
    security(("bearer_auth" = [])),
    request_body = DataRequest<CreateRoleRequest>,
    responses(
        (status = 200, description = "Role created", body = BaseResponse<RoleDto>),
        (status = 400, description = "Invalid name or not created", body = BaseResponse<EmptyData>),
        (status = 500, description = "Unexpected error", body = BaseResponse<EmptyData>)
    )
)]
pub async fn create_role(
    State(state): State<RoleHandlerState>,
    caller: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateRoleRequest>,
) -> ApiResult<RoleDto> {
    let data = CreateRoleDto::from(request);
    if !state.roles.check_name_valid(&data.name, "").await? {
        return Err(ApiError::bad_request("Invalid name"));
    }

    let role = state
        .roles
        .create_role(data, caller.actor())
        .await?
        .ok_or_else(|| ApiError::bad_request("Not created"))?;

    Ok(Json(BaseResponse::success(RoleDto::from(role))))
}

#[utoipa::path(
    put,
    path = "/role/{guid}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("guid" = String, Path, description = "Role guid")),
    request_body = DataRequest<CreateRoleRequest>,
    responses(
        (status = 200, description = "Role updated, or returned unchanged when not editable", body = BaseResponse<RoleDto>),
        (status = 400, description = "Invalid name", body = BaseResponse<EmptyData>),
        (status = 404, description = "Not found"),
        (status = 500, description = "Unexpected error", body = BaseResponse<EmptyData>)
    )
)]
pub async fn update_role(
    State(state): State<RoleHandlerState>,
    Path(guid): Path<String>,
    caller: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateRoleRequest>,
) -> ApiResult<RoleDto> {
    require_guid(&guid)?;
    let role = state.find_role(&guid).await?;

    let data = CreateRoleDto::from(request);
    if !state.roles.check_name_valid(&data.name, &role.guid).await? {
        return Err(ApiError::bad_request("Invalid name"));
    }

    let role = state.roles.update_role(data, role, caller.actor()).await?;
    Ok(Json(BaseResponse::success(RoleDto::from(role))))
}

#[utoipa::path(
    delete,
    path = "/role/{guid}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("guid" = String, Path, description = "Role guid")),
    responses(
        (status = 200, description = "Role deleted", body = BaseResponse<EmptyData>),
        (status = 404, description = "Not found"),
        (status = 500, description = "Unexpected error", body = BaseResponse<EmptyData>)
    )
)]
pub async fn delete_role(
    State(state): State<RoleHandlerState>,
    Path(guid): Path<String>,
    caller: AuthenticatedUser,
) -> ApiResult<EmptyData> {
    require_guid(&guid)?;
    let role = state.find_role(&guid).await?;

    if state.roles.delete_role(role, caller.actor()).await? {
        Ok(Json(BaseResponse::empty()))
    } else {
        Err(ApiError::Internal("Role not deleted".into()))
    }
}
