//! Settings the engine receives at construction.

use chrono::Duration;

use authpair_core::config::{AuthConfig, NotificationConfig};
use authpair_core::error::AppError;
use authpair_core::result::AppResult;

/// Immutable engine settings.
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// Lifetime of an access credential.
    pub access_ttl: Duration,
    /// Lifetime of a refresh record.
    pub refresh_ttl: Duration,
    /// Reject a secret after its first successful redemption.
    pub single_use_refresh: bool,
    /// Subject of the address-change alert.
    pub alert_subject: String,
    /// Body of the address-change alert.
    pub alert_body: String,
}

impl LifecycleConfig {
    /// Derives engine settings from the loaded configuration sections.
    ///
    /// Fails with `Configuration` when a TTL does not fit in a duration.
    pub fn from_config(auth: &AuthConfig, notifications: &NotificationConfig) -> AppResult<Self> {
        let access_ttl = i64::try_from(auth.access_ttl_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "auth.access_ttl_minutes out of range: {}",
                    auth.access_ttl_minutes
                ))
            })?;
        let refresh_ttl = i64::try_from(auth.refresh_ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "auth.refresh_ttl_hours out of range: {}",
                    auth.refresh_ttl_hours
                ))
            })?;

        Ok(Self {
            access_ttl,
            refresh_ttl,
            single_use_refresh: auth.single_use_refresh,
            alert_subject: notifications.subject.clone(),
            alert_body: notifications.body.clone(),
        })
    }
}

impl Default for LifecycleConfig {
    /// Same values `from_config` yields for the default sections.
    fn default() -> Self {
        let notifications = NotificationConfig::default();
        Self {
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::days(7),
            single_use_refresh: false,
            alert_subject: notifications.subject,
            alert_body: notifications.body,
        }
    }
}
