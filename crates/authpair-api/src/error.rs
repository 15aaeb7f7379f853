//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use authpair_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP-facing wrapper around `AppError`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and error code for the wrapped kind.
    fn status(&self) -> (StatusCode, &'static str) {
        match self.0.kind {
            ErrorKind::InvalidRequest => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::SigningFailure
            | ErrorKind::HashingFailure
            | ErrorKind::PersistenceFailure
            | ErrorKind::NotificationFailure
            | ErrorKind::Configuration
            | ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status();

        let message = if self.0.kind.is_server_error() {
            tracing::error!(
                kind = %self.0.kind,
                error = %self.0.message,
                source = ?self.0.source,
                "Internal server error"
            );
            "Internal server error".to_string()
        } else {
            self.0.message
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_client_errors_map_to_4xx() {
        assert_eq!(
            status_of(AppError::invalid_request("bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::unauthorized("nope")),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_infrastructure_errors_map_to_500() {
        for err in [
            AppError::signing("x"),
            AppError::hashing("x"),
            AppError::persistence("x"),
            AppError::notification("x"),
            AppError::configuration("x"),
            AppError::internal("x"),
        ] {
            assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
