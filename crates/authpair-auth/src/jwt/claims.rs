//! Claims embedded in every access credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload of a signed access credential.
///
/// Field names are part of the contract with downstream verifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Identity the credential was issued to.
    pub user_id: String,
    /// Client address the credential was issued to.
    pub client_ip: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl AccessClaims {
    /// Builds claims valid from `issued_at` until `expires_at`.
    pub fn new(
        identity: &str,
        address: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: identity.to_string(),
            client_ip: address.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Lifetime of the credential in seconds.
    pub fn lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }
}
