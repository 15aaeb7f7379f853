//! Token store backend selection.

use serde::{Deserialize, Serialize};

/// Which [`TokenStore`](crate::traits::TokenStore) backs the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreProvider {
    /// PostgreSQL via sqlx.
    #[default]
    Postgres,
    /// Process-local map. Records are lost on restart.
    Memory,
}

/// Token store configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Backend provider.
    #[serde(default)]
    pub provider: StoreProvider,
}
