//! Response envelope, request wrapper and the handler error boundary

pub mod validated_json;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::ServiceError;

pub use validated_json::ValidatedJson;

pub const NOT_WELL_FORMED: &str = "Request is not well formed";

/// Uniform JSON body: `{"status": 200, "message": "", "data": {...}}`.
///
/// A non-200 status always carries a message explaining the cause.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BaseResponse<T> {
    pub status: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> BaseResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: String::new(),
            data: Some(data),
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data: None,
        }
    }
}

impl BaseResponse<EmptyData> {
    /// 200 with `data: null`.
    pub fn empty() -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: String::new(),
            data: None,
        }
    }
}

/// Placeholder payload for responses without data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Request bodies carry their payload under `data`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DataRequest<T> {
    pub data: Option<T>,
}

pub type ApiResult<T> = Result<Json<BaseResponse<T>>, ApiError>;

/// Everything a handler can fail with, already mapped to a status code.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    /// 404 with an empty body.
    NotFound,
    Unauthorized(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_well_formed() -> Self {
        Self::BadRequest(NOT_WELL_FORMED.into())
    }
}

/// Path identifiers must not be blank.
pub fn require_guid(guid: &str) -> Result<(), ApiError> {
    if guid.trim().is_empty() {
        Err(ApiError::not_well_formed())
    } else {
        Ok(())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound => return StatusCode::NOT_FOUND.into_response(),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            Self::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Something went wrong. {message}"),
            ),
        };

        let body = BaseResponse::<EmptyData>::error(status, message);
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err.transaction_id() {
            Some(transaction_id) => {
                error!(%transaction_id, error = %err, "Request failed")
            }
            None => error!(error = %err, "Request failed"),
        }
        Self::Internal(err.to_string())
    }
}
