//! Integration tests for token issuance and refresh over HTTP.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use authpair_core::traits::TokenStore;

use helpers::{TestApp, TestResponse};

async fn refresh(app: &TestApp, secret: &str, forwarded_for: Option<&str>) -> TestResponse {
    app.request(
        "POST",
        "/auth/refresh",
        Some(json!({ "refresh_token": secret })),
        forwarded_for,
    )
    .await
}

#[tokio::test]
async fn test_issue_returns_pair_bound_to_client() {
    let app = TestApp::new();

    let (access, refresh_secret) = app.issue("42", Some("203.0.113.5")).await;

    assert!(!refresh_secret.is_empty());
    let claims = app.decode(&access);
    assert_eq!(claims.user_id, "42");
    assert_eq!(claims.client_ip, "203.0.113.5");
    assert_eq!(claims.lifetime_seconds(), 15 * 60);

    let records = app.store.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].bound_address, "203.0.113.5");
    assert_ne!(records[0].secret_hash, refresh_secret);
}

#[tokio::test]
async fn test_issue_provisions_placeholder_identity() {
    let app = TestApp::new();

    app.issue("42", None).await;

    let contact = app.store.find_identity_contact("42").await.unwrap();
    assert_eq!(contact.as_deref(), Some("user_42@mail.com"));
}

#[tokio::test]
async fn test_issue_keeps_existing_contact() {
    let app = TestApp::new();
    app.store
        .register_identity("42", "alice@example.com")
        .await
        .unwrap();

    app.issue("42", None).await;

    let contact = app.store.find_identity_contact("42").await.unwrap();
    assert_eq!(contact.as_deref(), Some("alice@example.com"));
}

#[tokio::test]
async fn test_issue_without_provisioning() {
    let app = TestApp::with_config(|c| c.auth.auto_provision_identities = false);

    app.issue("42", None).await;

    assert!(app.store.find_identity_contact("42").await.unwrap().is_none());
}

#[tokio::test]
async fn test_issue_rejects_empty_user_id() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/auth/tokens", Some(json!({ "user_id": "" })), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.str_field("error"), "INVALID_REQUEST");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .raw_request("POST", "/auth/refresh", "{not json".to_string(), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.str_field("error"), "INVALID_REQUEST");
}

#[tokio::test]
async fn test_peer_address_used_without_proxy_headers() {
    let app = TestApp::new();

    let (access, _) = app.issue("42", None).await;

    assert_eq!(app.decode(&access).client_ip, "127.0.0.1");
}

#[tokio::test]
async fn test_forwarded_port_is_stripped() {
    let app = TestApp::new();

    let (access, _) = app.issue("42", Some("198.51.100.7:61000, 10.0.0.1")).await;

    assert_eq!(app.decode(&access).client_ip, "198.51.100.7");
}

#[tokio::test]
async fn test_proxy_headers_ignored_when_untrusted() {
    let app = TestApp::with_config(|c| c.server.trust_proxy_headers = false);

    let (access, _) = app.issue("42", Some("198.51.100.7")).await;

    assert_eq!(app.decode(&access).client_ip, "127.0.0.1");
}

#[tokio::test]
async fn test_refresh_same_address_rotates_without_alert() {
    let app = TestApp::new();
    let (_, secret) = app.issue("42", Some("203.0.113.5")).await;

    let response = refresh(&app, &secret, Some("203.0.113.5")).await;

    assert_eq!(response.status, StatusCode::OK);
    let new_secret = response.str_field("refresh_token");
    assert_ne!(new_secret, secret);
    assert_eq!(
        app.decode(&response.str_field("access_token")).client_ip,
        "203.0.113.5"
    );
    assert_eq!(app.store.len().await, 2);
    assert!(app.next_alert().await.is_none());
}

#[tokio::test]
async fn test_refresh_new_address_alerts_contact() {
    let app = TestApp::new();
    let (_, secret) = app.issue("42", Some("203.0.113.5")).await;

    let response = refresh(&app, &secret, Some("198.51.100.9")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        app.decode(&response.str_field("access_token")).client_ip,
        "198.51.100.9"
    );

    let (contact, subject, body) = app.next_alert().await.expect("No alert sent");
    assert_eq!(contact, "user_42@mail.com");
    assert_eq!(subject, app.config.notifications.subject);
    assert_eq!(body, app.config.notifications.body);
    assert!(app.next_alert().await.is_none());
}

#[tokio::test]
async fn test_refresh_new_address_without_contact_still_succeeds() {
    let app = TestApp::with_config(|c| c.auth.auto_provision_identities = false);
    let (_, secret) = app.issue("42", Some("203.0.113.5")).await;

    let response = refresh(&app, &secret, Some("198.51.100.9")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(app.next_alert().await.is_none());
}

#[tokio::test]
async fn test_refresh_unknown_secret_is_unauthorized() {
    let app = TestApp::new();
    app.issue("42", None).await;

    let response = refresh(&app, "not-a-real-secret", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.str_field("error"), "UNAUTHORIZED");
    assert_eq!(
        response.str_field("message"),
        "Invalid or expired refresh token"
    );
}

#[tokio::test]
async fn test_refresh_empty_secret_is_bad_request() {
    let app = TestApp::new();

    let response = refresh(&app, "", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_reuse_allowed_by_default() {
    let app = TestApp::new();
    let (_, secret) = app.issue("42", None).await;

    assert_eq!(refresh(&app, &secret, None).await.status, StatusCode::OK);
    assert_eq!(refresh(&app, &secret, None).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_single_use_rejects_replay() {
    let app = TestApp::with_config(|c| c.auth.single_use_refresh = true);
    let (_, secret) = app.issue("42", None).await;

    let first = refresh(&app, &secret, None).await;
    let replay = refresh(&app, &secret, None).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        replay.str_field("message"),
        "Invalid or expired refresh token"
    );

    // The rotated secret is still good.
    let next = first.str_field("refresh_token");
    assert_eq!(refresh(&app, &next, None).await.status, StatusCode::OK);
}
