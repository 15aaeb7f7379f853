//! Access log for token endpoints.
//!
//! One event per request, keyed by the matched route so that refresh
//! rejections can be counted without parsing paths. Rejections log at
//! `warn`, infrastructure failures at `error`.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, info, warn};

/// How a request ended, as far as operators care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Served,
    Rejected,
    Failed,
}

impl Outcome {
    fn of(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::Failed
        } else if status.is_client_error() {
            Self::Rejected
        } else {
            Self::Served
        }
    }
}

/// Logs route, status, and latency of every routed request.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let method = request.method().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    match Outcome::of(response.status()) {
        Outcome::Served => info!(%method, %route, status, latency_ms, "Request served"),
        Outcome::Rejected => warn!(%method, %route, status, latency_ms, "Request rejected"),
        Outcome::Failed => error!(%method, %route, status, latency_ms, "Request failed"),
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_by_status_class() {
        assert_eq!(Outcome::of(StatusCode::OK), Outcome::Served);
        assert_eq!(Outcome::of(StatusCode::UNAUTHORIZED), Outcome::Rejected);
        assert_eq!(Outcome::of(StatusCode::BAD_REQUEST), Outcome::Rejected);
        assert_eq!(Outcome::of(StatusCode::INTERNAL_SERVER_ERROR), Outcome::Failed);
    }
}
