//! Notifier that writes alerts to the application log.

use async_trait::async_trait;
use tracing::info;

use authpair_core::result::AppResult;
use authpair_core::traits::Notifier;

/// Logs each alert instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl LogNotifier {
    /// Creates a new log notifier.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, contact: &str, subject: &str, body: &str) -> AppResult<()> {
        info!(contact = %contact, subject = %subject, body = %body, "Security notification");
        Ok(())
    }
}
