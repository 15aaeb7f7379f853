//! Token issuance configuration.

use serde::{Deserialize, Serialize};

/// Smallest bcrypt cost accepted by the hasher.
pub const MIN_HASH_COST: u32 = 4;
/// Largest bcrypt cost accepted by the hasher.
pub const MAX_HASH_COST: u32 = 31;
/// Longest accepted access credential TTL: one day.
pub const MAX_ACCESS_TTL_MINUTES: u64 = 24 * 60;
/// Longest accepted refresh secret TTL: one year.
pub const MAX_REFRESH_TTL_HOURS: u64 = 365 * 24;

/// Signing key, TTLs, and refresh policy.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Symmetric key used to sign access credentials (HMAC-SHA512).
    ///
    /// Has no default; an empty key is rejected at startup.
    #[serde(default)]
    pub signing_key: String,
    /// Access credential TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh secret TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_hours: u64,
    /// bcrypt work factor for refresh secret digests.
    #[serde(default = "default_hash_cost")]
    pub hash_cost: u32,
    /// Reject a refresh secret after its first successful redemption.
    #[serde(default)]
    pub single_use_refresh: bool,
    /// Create a placeholder identity when tokens are requested for an unknown one.
    #[serde(default = "default_true")]
    pub auto_provision_identities: bool,
    /// Mail domain used for placeholder contact addresses.
    #[serde(default = "default_contact_domain")]
    pub placeholder_contact_domain: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_key", &"<redacted>")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_hours", &self.refresh_ttl_hours)
            .field("hash_cost", &self.hash_cost)
            .field("single_use_refresh", &self.single_use_refresh)
            .field("auto_provision_identities", &self.auto_provision_identities)
            .field("placeholder_contact_domain", &self.placeholder_contact_domain)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signing_key: String::new(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_hours: default_refresh_ttl(),
            hash_cost: default_hash_cost(),
            single_use_refresh: false,
            auto_provision_identities: default_true(),
            placeholder_contact_domain: default_contact_domain(),
        }
    }
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7 * 24
}

fn default_hash_cost() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

fn default_contact_domain() -> String {
    "mail.com".to_string()
}
