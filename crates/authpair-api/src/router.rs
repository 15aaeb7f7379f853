//! Route definitions for the AuthPair HTTP API.

use axum::{Router, middleware as axum_middleware, routing::get, routing::post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(token_routes())
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Token endpoints: issue, refresh
fn token_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/tokens", post(handlers::auth::issue_tokens))
        .route("/auth/refresh", post(handlers::auth::refresh_tokens))
}

/// Liveness and health
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health::liveness))
        .route("/health", get(handlers::health::health))
}
