//! Address-change alert delivery.

pub mod log;
pub mod webhook;

use std::sync::Arc;

use authpair_core::config::{NotificationConfig, NotifierProvider};
use authpair_core::result::AppResult;
use authpair_core::traits::Notifier;

pub use self::log::LogNotifier;
pub use self::webhook::WebhookNotifier;

/// Builds the notifier selected by configuration.
pub fn build_notifier(config: &NotificationConfig) -> AppResult<Arc<dyn Notifier>> {
    match config.provider {
        NotifierProvider::Log => Ok(Arc::new(LogNotifier::new())),
        NotifierProvider::Webhook => Ok(Arc::new(WebhookNotifier::new(config)?)),
    }
}
