//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Token issuance request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IssueRequest {
    /// Identity the pair is issued for.
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
}

/// Token refresh request body.
///
/// An empty secret is rejected by the lifecycle engine itself.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh secret from a previous issuance.
    pub refresh_token: String,
}

impl std::fmt::Debug for RefreshRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshRequest")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}
