//! Persistence contract for refresh records.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{AppError, ErrorKind};
use crate::result::AppResult;
use crate::traits::SecretHasher;
use crate::types::RefreshRecord;

/// Repository of refresh records and identity contacts.
///
/// Implementations must be safe to share across tasks. Durability and
/// uniqueness are the store's responsibility; the lifecycle engine takes
/// no locks of its own.
#[async_trait]
pub trait TokenStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new record. Must be durable before returning `Ok`.
    async fn save(&self, record: &RefreshRecord) -> AppResult<()>;

    /// Return the unique record whose digest verifies against `secret`,
    /// or `None` when no record does.
    async fn find_by_secret(&self, secret: &str) -> AppResult<Option<RefreshRecord>>;

    /// Contact address for `identity`, or `None` if the identity is unknown.
    async fn find_identity_contact(&self, identity: &str) -> AppResult<Option<String>>;

    /// Register `identity` with `contact` if it does not exist yet.
    async fn register_identity(&self, identity: &str, contact: &str) -> AppResult<()>;

    /// Mark `consumed_id` as redeemed at `at` and persist `replacement`
    /// as a single atomic write.
    ///
    /// Returns `false`, with nothing written, when the record was already
    /// redeemed or does not exist. On `Err` nothing is written either, so
    /// the consumed record stays redeemable.
    async fn rotate(
        &self,
        consumed_id: Uuid,
        at: DateTime<Utc>,
        replacement: &RefreshRecord,
    ) -> AppResult<bool>;
}

/// Return the first candidate whose digest verifies against `secret`.
///
/// Salted digests cannot be matched by equality, so every candidate is
/// verified in turn. Runs on the blocking pool because each verification
/// costs a full bcrypt round.
pub async fn select_verified(
    hasher: Arc<dyn SecretHasher>,
    secret: &str,
    candidates: Vec<RefreshRecord>,
) -> AppResult<Option<RefreshRecord>> {
    if candidates.is_empty() {
        return Ok(None);
    }

    let secret = secret.to_string();
    tokio::task::spawn_blocking(move || {
        candidates
            .into_iter()
            .find(|record| hasher.verify(&secret, &record.secret_hash))
    })
    .await
    .map_err(|e| AppError::with_source(ErrorKind::HashingFailure, "Verification task failed", e))
}
