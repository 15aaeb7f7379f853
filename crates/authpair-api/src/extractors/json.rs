//! `ValidatedJson` extractor — JSON body that has passed `validator` checks.

use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::extract::rejection::JsonRejection;
use serde::de::DeserializeOwned;
use validator::Validate;

use authpair_core::error::AppError;

use crate::error::ApiError;

/// A deserialized, validated request body.
///
/// Malformed JSON and failed validation both surface as `InvalidRequest`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| AppError::invalid_request(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::invalid_request(e.to_string()))?;

        Ok(Self(value))
    }
}
