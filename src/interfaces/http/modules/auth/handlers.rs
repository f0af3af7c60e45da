//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use super::dto::{AuthenticateRequest, AuthenticateResponse};
use crate::domain::AuthServicePort;
use crate::interfaces::http::common::{
    ApiError, ApiResult, BaseResponse, DataRequest, EmptyData, ValidatedJson,
};

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub auth: Arc<dyn AuthServicePort>,
}

#[utoipa::path(
    post,
    path = "/auth/authenticate",
    tag = "Authentication",
    request_body = DataRequest<AuthenticateRequest>,
    responses(
        (status = 200, description = "Successful login", body = BaseResponse<AuthenticateResponse>),
        (status = 400, description = "Request is not well formed", body = BaseResponse<EmptyData>),
        (status = 404, description = "No user matches the credentials"),
        (status = 500, description = "Unexpected error", body = BaseResponse<EmptyData>)
    )
)]
pub async fn authenticate(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<AuthenticateRequest>,
) -> ApiResult<AuthenticateResponse> {
    let result = state
        .auth
        .authenticate(request.into())
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(BaseResponse::success(AuthenticateResponse::from(
        result,
    ))))
}
