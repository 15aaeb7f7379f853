//! Integration tests for liveness and health endpoints.

mod helpers;

use axum::http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_liveness() {
    let app = TestApp::new();

    let response = app.request("GET", "/", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text, "ok");
}

#[tokio::test]
async fn test_health_reports_version() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_field("status"), "ok");
    assert_eq!(response.str_field("version"), env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();

    let response = app.request("GET", "/auth/unknown", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
