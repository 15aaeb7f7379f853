//! Token lifecycle engine — issue and refresh flows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use authpair_core::error::{AppError, ErrorKind};
use authpair_core::result::AppResult;
use authpair_core::traits::{Notifier, SecretHasher, TokenStore};
use authpair_core::types::{RefreshRecord, TokenPair, lookup_key};

use crate::jwt::{AccessClaims, AccessTokenSigner};
use crate::secret::generate_refresh_secret;

use super::config::LifecycleConfig;

/// Message attached to every refresh rejection, whatever the cause.
pub const UNAUTHORIZED_MESSAGE: &str = "Invalid or expired refresh token";

/// Issues token pairs and rotates them on refresh.
///
/// Stateless apart from its immutable collaborators; every call is
/// independent and may run concurrently with others.
#[derive(Clone)]
pub struct TokenLifecycle {
    /// Access credential signer.
    signer: Arc<AccessTokenSigner>,
    /// Refresh secret hasher.
    hasher: Arc<dyn SecretHasher>,
    /// Refresh record persistence.
    store: Arc<dyn TokenStore>,
    /// Address-change alert delivery.
    notifier: Arc<dyn Notifier>,
    /// TTLs and refresh policy.
    config: LifecycleConfig,
}

impl std::fmt::Debug for TokenLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenLifecycle")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish()
    }
}

impl TokenLifecycle {
    /// Creates a new engine with all required collaborators.
    pub fn new(
        signer: Arc<AccessTokenSigner>,
        hasher: Arc<dyn SecretHasher>,
        store: Arc<dyn TokenStore>,
        notifier: Arc<dyn Notifier>,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            signer,
            hasher,
            store,
            notifier,
            config,
        }
    }

    /// Returns the store backing this engine.
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Issues a fresh token pair for `identity` bound to `address`.
    ///
    /// 1. Generate a refresh secret
    /// 2. Sign the access credential
    /// 3. Hash the secret
    /// 4. Persist the refresh record
    ///
    /// The refresh secret in the returned pair is never retrievable again.
    pub async fn issue(&self, identity: &str, address: &str) -> AppResult<TokenPair> {
        self.issue_at(identity, address, Utc::now()).await
    }

    /// Exchanges a refresh secret for a new token pair.
    ///
    /// 1. Reject an empty secret
    /// 2. Locate the record whose digest verifies
    /// 3. Reject expired records
    /// 4. Mint the replacement pair
    /// 5. Persist it; in single-use mode the old record is claimed in the
    ///    same store write
    /// 6. Alert the identity's contact if the address changed
    pub async fn refresh(&self, presented_secret: &str, address: &str) -> AppResult<TokenPair> {
        self.refresh_at(presented_secret, address, Utc::now()).await
    }

    pub(crate) async fn issue_at(
        &self,
        identity: &str,
        address: &str,
        now: DateTime<Utc>,
    ) -> AppResult<TokenPair> {
        let (record, tokens) = self.mint(identity, address, now).await?;

        // Persist before anything is returned
        self.store.save(&record).await.map_err(|e| {
            error!(
                identity = %identity,
                record_id = %record.id,
                error = %e,
                "Failed to persist refresh record"
            );
            into_kind(e, ErrorKind::PersistenceFailure)
        })?;

        info!(
            identity = %identity,
            record_id = %record.id,
            address = %address,
            "Token pair issued"
        );

        Ok(tokens)
    }

    pub(crate) async fn refresh_at(
        &self,
        presented_secret: &str,
        address: &str,
        now: DateTime<Utc>,
    ) -> AppResult<TokenPair> {
        // Step 1: Input
        if presented_secret.is_empty() {
            return Err(AppError::invalid_request("refresh_token must not be empty"));
        }

        // Step 2: Lookup. Unknown and mismatched secrets are indistinguishable.
        let record = self
            .store
            .find_by_secret(presented_secret)
            .await
            .map_err(|e| {
                error!(error = %e, "Refresh record lookup failed");
                into_kind(e, ErrorKind::PersistenceFailure)
            })?
            .ok_or_else(|| {
                warn!("Refresh secret did not match any record");
                rejected()
            })?;

        // Step 3: Expiry
        if record.is_expired_at(now) {
            warn!(
                identity = %record.identity,
                record_id = %record.id,
                expired_at = %record.expires_at,
                "Refresh secret expired"
            );
            return Err(rejected());
        }
        if self.config.single_use_refresh && record.is_consumed() {
            warn!(
                identity = %record.identity,
                record_id = %record.id,
                "Refresh secret already redeemed"
            );
            return Err(rejected());
        }

        // Step 4: Replacement
        let (replacement, tokens) = self.mint(&record.identity, address, now).await?;

        // Step 5: Persist. A failed write leaves the old record redeemable.
        if self.config.single_use_refresh {
            let rotated = self
                .store
                .rotate(record.id, now, &replacement)
                .await
                .map_err(|e| {
                    error!(
                        record_id = %record.id,
                        replacement_id = %replacement.id,
                        error = %e,
                        "Failed to rotate refresh record"
                    );
                    into_kind(e, ErrorKind::PersistenceFailure)
                })?;

            if !rotated {
                warn!(
                    identity = %record.identity,
                    record_id = %record.id,
                    "Refresh secret already redeemed"
                );
                return Err(rejected());
            }
        } else {
            self.store.save(&replacement).await.map_err(|e| {
                error!(
                    identity = %record.identity,
                    record_id = %replacement.id,
                    error = %e,
                    "Failed to persist refresh record"
                );
                into_kind(e, ErrorKind::PersistenceFailure)
            })?;
        }

        // Step 6: Address binding is a soft signal
        if !record.is_bound_to(address) {
            warn!(
                identity = %record.identity,
                record_id = %record.id,
                bound_address = %record.bound_address,
                address = %address,
                "Refresh from a new address"
            );
            self.spawn_address_alert(&record.identity);
        }

        info!(
            identity = %record.identity,
            superseded = %record.id,
            record_id = %replacement.id,
            "Tokens refreshed"
        );

        Ok(tokens)
    }

    /// Builds a new pair and the record that will back it. Nothing is
    /// persisted here.
    async fn mint(
        &self,
        identity: &str,
        address: &str,
        now: DateTime<Utc>,
    ) -> AppResult<(RefreshRecord, TokenPair)> {
        let access_expires_at = now.checked_add_signed(self.config.access_ttl);
        let refresh_expires_at = now.checked_add_signed(self.config.refresh_ttl);
        let (Some(access_expires_at), Some(expires_at)) = (access_expires_at, refresh_expires_at)
        else {
            error!(identity = %identity, "Token expiry is out of range");
            return Err(AppError::configuration("Token TTL is out of range"));
        };

        let refresh_secret = generate_refresh_secret(self.hasher.max_secret_len());

        let claims = AccessClaims::new(identity, address, now, access_expires_at);
        let access_token = self.signer.sign(&claims).map_err(|e| {
            error!(identity = %identity, error = %e, "Failed to sign access token");
            into_kind(e, ErrorKind::SigningFailure)
        })?;

        let secret_hash = self.hash_secret(&refresh_secret).await.map_err(|e| {
            error!(identity = %identity, error = %e, "Failed to hash refresh secret");
            into_kind(e, ErrorKind::HashingFailure)
        })?;

        let record = RefreshRecord {
            id: Uuid::new_v4(),
            identity: identity.to_string(),
            secret_hash,
            lookup_key: lookup_key(&refresh_secret),
            bound_address: address.to_string(),
            issued_at: now,
            expires_at,
            consumed_at: None,
        };

        Ok((
            record,
            TokenPair {
                access_token,
                refresh_token: refresh_secret,
            },
        ))
    }

    /// Hashes on the blocking pool; bcrypt is deliberately slow.
    async fn hash_secret(&self, secret: &str) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let secret = secret.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::HashingFailure, "Hashing task failed", e)
            })?
    }

    /// Looks up the identity's contact and sends the alert in the
    /// background. Failures are logged and never reach the caller.
    fn spawn_address_alert(&self, identity: &str) {
        let store = Arc::clone(&self.store);
        let notifier = Arc::clone(&self.notifier);
        let identity = identity.to_string();
        let subject = self.config.alert_subject.clone();
        let body = self.config.alert_body.clone();

        tokio::spawn(async move {
            let contact = match store.find_identity_contact(&identity).await {
                Ok(Some(contact)) => contact,
                Ok(None) => {
                    warn!(identity = %identity, "No contact on file, alert skipped");
                    return;
                }
                Err(e) => {
                    error!(identity = %identity, error = %e, "Failed to look up alert contact");
                    return;
                }
            };

            match notifier.notify(&contact, &subject, &body).await {
                Ok(()) => info!(identity = %identity, contact = %contact, "Address alert sent"),
                Err(e) => error!(
                    identity = %identity,
                    contact = %contact,
                    error = %e,
                    "Failed to send address alert"
                ),
            }
        });
    }
}

/// The single error every refresh rejection collapses to.
fn rejected() -> AppError {
    AppError::unauthorized(UNAUTHORIZED_MESSAGE)
}

/// Re-tags a collaborator error with the kind the engine reports for
/// that step, keeping the original as the source.
fn into_kind(err: AppError, kind: ErrorKind) -> AppError {
    if err.kind == kind {
        return err;
    }
    let message = err.message.clone();
    AppError::with_source(kind, message, err)
}
