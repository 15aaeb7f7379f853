//! Outbound security notifications.

use async_trait::async_trait;

use crate::result::AppResult;

/// Delivers a message to a contact address.
///
/// Callers treat delivery as fire-and-forget: an error is logged and
/// never reaches the end user.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug + 'static {
    /// Send `subject` / `body` to `contact`.
    async fn notify(&self, contact: &str, subject: &str, body: &str) -> AppResult<()>;
}
