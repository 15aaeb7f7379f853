//! In-memory token store using a Tokio lock for single-node deployments
//! and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use authpair_core::error::AppError;
use authpair_core::traits::store::select_verified;
use authpair_core::traits::{SecretHasher, TokenStore};
use authpair_core::types::{Identity, RefreshRecord, lookup_key};

/// Internal state for the memory-based store.
#[derive(Debug, Default)]
struct InnerState {
    /// Refresh records keyed by record ID.
    records: HashMap<Uuid, RefreshRecord>,
    /// Known identities keyed by identity ID.
    identities: HashMap<String, Identity>,
}

/// Process-local [`TokenStore`]. Contents are lost on restart.
#[derive(Debug, Clone)]
pub struct MemoryTokenStore {
    /// Verifies presented secrets against stored digests.
    hasher: Arc<dyn SecretHasher>,
    /// Protected inner state.
    state: Arc<RwLock<InnerState>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new(hasher: Arc<dyn SecretHasher>) -> Self {
        Self {
            hasher,
            state: Arc::new(RwLock::new(InnerState::default())),
        }
    }

    /// Snapshot of all stored records, oldest first.
    pub async fn records(&self) -> Vec<RefreshRecord> {
        let state = self.state.read().await;
        let mut records: Vec<RefreshRecord> = state.records.values().cloned().collect();
        records.sort_by_key(|r| r.issued_at);
        records
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Inserts or replaces a record verbatim.
    pub async fn put(&self, record: RefreshRecord) {
        self.state.write().await.records.insert(record.id, record);
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn save(&self, record: &RefreshRecord) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if state.records.contains_key(&record.id) {
            return Err(AppError::persistence(format!(
                "Refresh record {} already exists",
                record.id
            )));
        }
        state.records.insert(record.id, record.clone());
        Ok(())
    }

    async fn find_by_secret(&self, secret: &str) -> Result<Option<RefreshRecord>, AppError> {
        let key = lookup_key(secret);
        let candidates: Vec<RefreshRecord> = {
            let state = self.state.read().await;
            state
                .records
                .values()
                .filter(|r| r.lookup_key == key)
                .cloned()
                .collect()
        };

        select_verified(Arc::clone(&self.hasher), secret, candidates).await
    }

    async fn find_identity_contact(&self, identity: &str) -> Result<Option<String>, AppError> {
        let state = self.state.read().await;
        Ok(state.identities.get(identity).map(|i| i.contact.clone()))
    }

    async fn register_identity(&self, identity: &str, contact: &str) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        state
            .identities
            .entry(identity.to_string())
            .or_insert_with(|| Identity {
                id: identity.to_string(),
                contact: contact.to_string(),
                created_at: Utc::now(),
            });
        Ok(())
    }

    async fn rotate(
        &self,
        consumed_id: Uuid,
        at: DateTime<Utc>,
        replacement: &RefreshRecord,
    ) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        if state.records.contains_key(&replacement.id) {
            return Err(AppError::persistence(format!(
                "Refresh record {} already exists",
                replacement.id
            )));
        }

        match state.records.get_mut(&consumed_id) {
            Some(record) if record.consumed_at.is_none() => record.consumed_at = Some(at),
            _ => return Ok(false),
        }
        state.records.insert(replacement.id, replacement.clone());
        Ok(true)
    }
}
