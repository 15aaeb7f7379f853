//! Principal identity known to the token store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A principal tokens can be issued for, with the address used for
/// security alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Identity {
    /// Caller-supplied stable identifier.
    pub id: String,
    /// Contact address (e-mail) for notifications.
    pub contact: String,
    /// When the identity was registered.
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Builds the placeholder contact used when an identity is provisioned
    /// on first issuance.
    pub fn placeholder_contact(identity: &str, domain: &str) -> String {
        format!("user_{identity}@{domain}")
    }
}
