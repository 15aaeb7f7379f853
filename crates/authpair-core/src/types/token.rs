//! Refresh records and issued token pairs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Number of hex characters kept from the SHA-256 fingerprint.
const LOOKUP_KEY_LEN: usize = 16;

/// One outstanding refresh token.
///
/// Created on every successful issuance. Only the bcrypt digest of the
/// secret is kept; the plaintext is handed to the caller once.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct RefreshRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// Owning principal.
    pub identity: String,
    /// bcrypt digest of the refresh secret.
    pub secret_hash: String,
    /// Truncated SHA-256 fingerprint used to narrow the verify scan.
    pub lookup_key: String,
    /// Client network address captured at issuance.
    pub bound_address: String,
    /// Issuance time.
    pub issued_at: DateTime<Utc>,
    /// Expiry time (`issued_at` + refresh TTL).
    pub expires_at: DateTime<Utc>,
    /// Set when single-use rotation claims the record.
    pub consumed_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for RefreshRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshRecord")
            .field("id", &self.id)
            .field("identity", &self.identity)
            .field("bound_address", &self.bound_address)
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .field("consumed_at", &self.consumed_at)
            .finish_non_exhaustive()
    }
}

impl RefreshRecord {
    /// A record whose expiry equals `now` is already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Whether the record was issued to `address`.
    pub fn is_bound_to(&self, address: &str) -> bool {
        self.bound_address == address
    }

    /// Whether single-use rotation already claimed this record.
    pub fn is_consumed(&self) -> bool {
        self.consumed_at.is_some()
    }
}

/// Computes the non-secret lookup key for a refresh secret.
///
/// Stores index on this value so a presented secret only has to be
/// bcrypt-verified against a handful of candidates.
pub fn lookup_key(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    let mut key = hex::encode(digest);
    key.truncate(LOOKUP_KEY_LEN);
    key
}

/// Access credential plus refresh secret, returned to the caller once.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    /// Signed short-lived access credential.
    pub access_token: String,
    /// Opaque long-lived refresh secret.
    pub refresh_token: String,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_at: DateTime<Utc>) -> RefreshRecord {
        RefreshRecord {
            id: Uuid::new_v4(),
            identity: "u1".to_string(),
            secret_hash: "$2b$04$placeholder".to_string(),
            lookup_key: lookup_key("secret"),
            bound_address: "1.2.3.4".to_string(),
            issued_at: expires_at - Duration::days(7),
            expires_at,
            consumed_at: None,
        }
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let now = Utc::now();
        assert!(record(now).is_expired_at(now));
        assert!(record(now - Duration::seconds(1)).is_expired_at(now));
        assert!(!record(now + Duration::seconds(1)).is_expired_at(now));
    }

    #[test]
    fn test_address_binding() {
        let rec = record(Utc::now());
        assert!(rec.is_bound_to("1.2.3.4"));
        assert!(!rec.is_bound_to("9.9.9.9"));
    }

    #[test]
    fn test_lookup_key_is_stable_and_short() {
        let a = lookup_key("abc");
        assert_eq!(a, lookup_key("abc"));
        assert_eq!(a.len(), 16);
        assert_ne!(a, lookup_key("abd"));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let rec = record(Utc::now());
        assert!(!format!("{rec:?}").contains("placeholder"));

        let pair = TokenPair {
            access_token: "header.payload.sig".to_string(),
            refresh_token: "plaintext-secret".to_string(),
        };
        let rendered = format!("{pair:?}");
        assert!(!rendered.contains("plaintext-secret"));
    }
}
