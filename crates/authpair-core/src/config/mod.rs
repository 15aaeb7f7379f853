//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod logging;
pub mod notification;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::AuthConfig;
pub use self::logging::LoggingConfig;
pub use self::notification::{NotificationConfig, NotifierProvider};
pub use self::store::{StoreConfig, StoreProvider};

use self::auth::{MAX_ACCESS_TTL_MINUTES, MAX_HASH_COST, MAX_REFRESH_TTL_HOURS, MIN_HASH_COST};
use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token store backend.
    #[serde(default)]
    pub store: StoreConfig,
    /// Token issuance settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Security notification settings.
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database connection pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    #[serde(default)]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `AUTHPAIR__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("AUTHPAIR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Check invariants the deserializer cannot express.
    ///
    /// A missing signing key is the one startup condition that is fatal
    /// to the process.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.signing_key.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.signing_key must be set (AUTHPAIR__AUTH__SIGNING_KEY)",
            ));
        }

        if self.auth.access_ttl_minutes == 0 || self.auth.refresh_ttl_hours == 0 {
            return Err(AppError::configuration("Token TTLs must be positive"));
        }

        if self.auth.access_ttl_minutes > MAX_ACCESS_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.access_ttl_minutes must not exceed {MAX_ACCESS_TTL_MINUTES}"
            )));
        }

        if self.auth.refresh_ttl_hours > MAX_REFRESH_TTL_HOURS {
            return Err(AppError::configuration(format!(
                "auth.refresh_ttl_hours must not exceed {MAX_REFRESH_TTL_HOURS}"
            )));
        }

        if self.auth.access_ttl_minutes >= self.auth.refresh_ttl_hours * 60 {
            return Err(AppError::configuration(
                "auth.access_ttl_minutes must be shorter than auth.refresh_ttl_hours",
            ));
        }

        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&self.auth.hash_cost) {
            return Err(AppError::configuration(format!(
                "auth.hash_cost must be between {MIN_HASH_COST} and {MAX_HASH_COST}"
            )));
        }

        if self.store.provider == StoreProvider::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required for the postgres store",
            ));
        }

        if self.notifications.provider == NotifierProvider::Webhook
            && self.notifications.webhook_url.is_empty()
        {
            return Err(AppError::configuration(
                "notifications.webhook_url is required for the webhook provider",
            ));
        }

        Ok(())
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}
