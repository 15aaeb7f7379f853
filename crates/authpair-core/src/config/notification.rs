//! Security notification configuration.

use serde::{Deserialize, Serialize};

/// Which notifier delivers address-change alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotifierProvider {
    /// Write the alert to the application log.
    #[default]
    Log,
    /// POST the alert as JSON to `webhook_url`.
    Webhook,
}

/// Notification delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Delivery provider.
    #[serde(default)]
    pub provider: NotifierProvider,
    /// Target URL for the webhook provider.
    #[serde(default)]
    pub webhook_url: String,
    /// Per-delivery timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Subject line of the address-change alert.
    #[serde(default = "default_subject")]
    pub subject: String,
    /// Body of the address-change alert.
    #[serde(default = "default_body")]
    pub body: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            provider: NotifierProvider::default(),
            webhook_url: String::new(),
            timeout_seconds: default_timeout(),
            subject: default_subject(),
            body: default_body(),
        }
    }
}

fn default_timeout() -> u64 {
    5
}

fn default_subject() -> String {
    "Security Alert".to_string()
}

fn default_body() -> String {
    "Access to your account was obtained from a new IP address.".to_string()
}
