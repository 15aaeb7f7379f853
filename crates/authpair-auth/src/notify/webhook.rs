//! Notifier that POSTs alerts to an HTTP endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use authpair_core::config::NotificationConfig;
use authpair_core::error::{AppError, ErrorKind};
use authpair_core::result::AppResult;
use authpair_core::traits::Notifier;

/// JSON body sent to the webhook.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    contact: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Delivers alerts to a mail/SMS relay over HTTP.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    /// HTTP client with the configured timeout.
    client: reqwest::Client,
    /// Target URL.
    url: String,
}

impl WebhookNotifier {
    /// Creates a webhook notifier from configuration.
    pub fn new(config: &NotificationConfig) -> AppResult<Self> {
        if config.webhook_url.is_empty() {
            return Err(AppError::configuration(
                "notifications.webhook_url must be set for the webhook provider",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build webhook client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            client,
            url: config.webhook_url.clone(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, contact: &str, subject: &str, body: &str) -> AppResult<()> {
        let payload = WebhookPayload {
            contact,
            subject,
            body,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::NotificationFailure,
                    format!("Webhook request failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::notification(format!(
                "Webhook responded with {status}"
            )));
        }

        debug!(status = %status, "Webhook notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_url() {
        let config = NotificationConfig::default();
        let err = WebhookNotifier::new(&config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_notification_failure() {
        let config = NotificationConfig {
            webhook_url: "http://127.0.0.1:9/alerts".to_string(),
            timeout_seconds: 1,
            ..NotificationConfig::default()
        };
        let notifier = WebhookNotifier::new(&config).unwrap();
        let err = notifier
            .notify("u1@example.com", "Security Alert", "body")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotificationFailure);
    }
}
