//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tokio::sync::{Mutex, mpsc};
use tower::ServiceExt;

use authpair_auth::{
    AccessClaims, AccessTokenSigner, AccessTokenVerifier, BcryptHasher, LifecycleConfig,
    MemoryTokenStore, TokenLifecycle,
};
use authpair_core::config::{AppConfig, StoreProvider};
use authpair_core::result::AppResult;
use authpair_core::traits::{Notifier, SecretHasher, TokenStore};

/// Signing key used by every test app.
pub const TEST_SIGNING_KEY: &str = "integration-test-signing-key";

/// Socket peer attached to every request.
pub const PEER_ADDR: &str = "127.0.0.1:50000";

/// Alert captured by the recording notifier: (contact, subject, body).
pub type Alert = (String, String, String);

#[derive(Debug)]
struct RecordingNotifier {
    tx: mpsc::UnboundedSender<Alert>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, contact: &str, subject: &str, body: &str) -> AppResult<()> {
        let _ = self
            .tx
            .send((contact.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store backing the router, for direct inspection
    pub store: Arc<MemoryTokenStore>,
    /// Application config
    pub config: AppConfig,
    alerts: Mutex<mpsc::UnboundedReceiver<Alert>>,
}

impl TestApp {
    /// Create a new test application with default settings
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a new test application, adjusting the config first
    pub fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::default();
        config.auth.signing_key = TEST_SIGNING_KEY.to_string();
        config.auth.hash_cost = 4;
        config.store.provider = StoreProvider::Memory;
        adjust(&mut config);
        config.validate().expect("Invalid test config");

        let hasher: Arc<dyn SecretHasher> =
            Arc::new(BcryptHasher::new(config.auth.hash_cost).expect("Failed to build hasher"));
        let signer = Arc::new(
            AccessTokenSigner::new(&config.auth.signing_key).expect("Failed to build signer"),
        );
        let store = Arc::new(MemoryTokenStore::new(Arc::clone(&hasher)));
        let (tx, rx) = mpsc::unbounded_channel();

        let lifecycle = Arc::new(TokenLifecycle::new(
            signer,
            hasher,
            Arc::clone(&store) as Arc<dyn TokenStore>,
            Arc::new(RecordingNotifier { tx }),
            LifecycleConfig::from_config(&config.auth, &config.notifications)
                .expect("Failed to derive lifecycle config"),
        ));

        let state = authpair_api::AppState::new(Arc::new(config.clone()), lifecycle);
        let router = authpair_api::build_router(state);

        Self {
            router,
            store,
            config,
            alerts: Mutex::new(rx),
        }
    }

    /// Make a JSON request, optionally with an `X-Forwarded-For` header
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        forwarded_for: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.raw_request(method, path, body_str, forwarded_for).await
    }

    /// Make a request with a raw body
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: String,
        forwarded_for: Option<&str>,
    ) -> TestResponse {
        let peer: SocketAddr = PEER_ADDR.parse().expect("Invalid peer address");

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .extension(ConnectInfo(peer));

        if let Some(addr) = forwarded_for {
            req = req.header("X-Forwarded-For", addr);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body, text }
    }

    /// Issue a pair for `user_id` and return (access_token, refresh_token)
    pub async fn issue(&self, user_id: &str, forwarded_for: Option<&str>) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/auth/tokens",
                Some(serde_json::json!({ "user_id": user_id })),
                forwarded_for,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Issue failed: {:?}",
            response.body
        );

        (response.str_field("access_token"), response.str_field("refresh_token"))
    }

    /// Decode an access token with the test signing key
    pub fn decode(&self, access_token: &str) -> AccessClaims {
        AccessTokenVerifier::new(&self.config.auth.signing_key)
            .verify(access_token)
            .expect("Failed to verify access token")
    }

    /// Wait briefly for the next address-change alert
    pub async fn next_alert(&self) -> Option<Alert> {
        let mut alerts = self.alerts.lock().await;
        tokio::time::timeout(Duration::from_millis(500), alerts.recv())
            .await
            .ok()
            .flatten()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body, `Null` when not JSON
    pub body: Value,
    /// Raw body text
    pub text: String,
}

impl TestResponse {
    /// Returns a string field from the JSON body
    pub fn str_field(&self, name: &str) -> String {
        self.body
            .get(name)
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| panic!("No {name} in response: {:?}", self.body))
            .to_string()
    }
}
