//! Application version endpoint

use axum::{extract::State, Json};

use crate::interfaces::http::common::BaseResponse;

#[derive(Clone, Debug)]
pub struct VersionState {
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/version",
    tag = "Version",
    responses(
        (status = 200, description = "Configured application version", body = BaseResponse<String>)
    )
)]
pub async fn get_version(State(state): State<VersionState>) -> Json<BaseResponse<String>> {
    Json(BaseResponse::success(state.version))
}
