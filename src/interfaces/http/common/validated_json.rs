//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` reads a `{"data": T}` body, requires `data` to be
//! present and runs `validator::Validate::validate()` on it. Malformed JSON,
//! a missing `data` and validation failures all reject with a 400
//! "Request is not well formed" envelope.

use axum::extract::FromRequest;
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use super::{ApiError, DataRequest};

/// An extractor that unwraps the `data` envelope and validates it.
///
/// # Usage
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateRoleRequest {
///     #[validate(length(min = 1))]
///     name: String,
/// }
///
/// async fn handler(ValidatedJson(data): ValidatedJson<CreateRoleRequest>) {
///     // `data` is present and passed validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<DataRequest<T>>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(error = %rejection, "Rejected request body");
                ApiError::not_well_formed()
            })?;

        let Some(data) = body.data else {
            debug!("Request body has no data");
            return Err(ApiError::not_well_formed());
        };

        data.validate().map_err(|errors| {
            debug!(error = %errors, "Request data failed validation");
            ApiError::not_well_formed()
        })?;

        Ok(ValidatedJson(data))
    }
}
