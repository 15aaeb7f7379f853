//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use authpair_auth::TokenLifecycle;
use authpair_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token issue/refresh engine
    pub lifecycle: Arc<TokenLifecycle>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Creates the state, stamping the start time.
    pub fn new(config: Arc<AppConfig>, lifecycle: Arc<TokenLifecycle>) -> Self {
        Self {
            config,
            lifecycle,
            started_at: Instant::now(),
        }
    }
}
