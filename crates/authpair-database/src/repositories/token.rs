//! PostgreSQL-backed token store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use uuid::Uuid;

use authpair_core::config::DatabaseConfig;
use authpair_core::error::{AppError, ErrorKind};
use authpair_core::result::AppResult;
use authpair_core::traits::store::select_verified;
use authpair_core::traits::{SecretHasher, TokenStore};
use authpair_core::types::{RefreshRecord, lookup_key};

/// Persists refresh records and identities in PostgreSQL.
///
/// Presented secrets are resolved by narrowing on the indexed
/// `lookup_key` column and bcrypt-verifying each candidate.
#[derive(Debug, Clone)]
pub struct PgTokenStore {
    pool: PgPool,
    /// Verifies presented secrets against stored digests.
    hasher: Arc<dyn SecretHasher>,
}

/// Schema for `identities` and `refresh_tokens`.
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

impl PgTokenStore {
    /// Create a store over an existing pool. The schema must already exist.
    pub fn new(pool: PgPool, hasher: Arc<dyn SecretHasher>) -> Self {
        Self { pool, hasher }
    }

    /// Open a pool from `config`, bring the schema up to date, and
    /// return a store ready to serve requests.
    pub async fn connect(
        config: &DatabaseConfig,
        hasher: Arc<dyn SecretHasher>,
    ) -> AppResult<Self> {
        info!(
            url = %redact_credentials(&config.url),
            pool_size = config.max_connections,
            "Opening token store"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .test_before_acquire(true)
            .connect(&config.url)
            .await?;

        MIGRATOR.run(&pool).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceFailure,
                "Failed to apply token store schema",
                e,
            )
        })?;

        let unexpired: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM refresh_tokens WHERE expires_at > NOW()")
                .fetch_one(&pool)
                .await?;
        info!(
            schema_version = MIGRATOR.iter().map(|m| m.version).max().unwrap_or_default(),
            unexpired_records = unexpired,
            "Token store ready"
        );

        Ok(Self::new(pool, hasher))
    }

    /// Wait for in-flight queries and close every connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Token store closed");
    }
}

#[async_trait]
impl TokenStore for PgTokenStore {
    async fn save(&self, record: &RefreshRecord) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO refresh_tokens \
             (id, identity, secret_hash, lookup_key, bound_address, issued_at, expires_at, consumed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(record.id)
        .bind(&record.identity)
        .bind(&record.secret_hash)
        .bind(&record.lookup_key)
        .bind(&record.bound_address)
        .bind(record.issued_at)
        .bind(record.expires_at)
        .bind(record.consumed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceFailure,
                "Failed to save refresh record",
                e,
            )
        })?;
        Ok(())
    }

    async fn find_by_secret(&self, secret: &str) -> AppResult<Option<RefreshRecord>> {
        let candidates = sqlx::query_as::<_, RefreshRecord>(
            "SELECT * FROM refresh_tokens WHERE lookup_key = $1",
        )
        .bind(lookup_key(secret))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceFailure,
                "Failed to load refresh candidates",
                e,
            )
        })?;

        select_verified(Arc::clone(&self.hasher), secret, candidates).await
    }

    async fn find_identity_contact(&self, identity: &str) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT contact FROM identities WHERE id = $1")
            .bind(identity)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::PersistenceFailure,
                    "Failed to find identity contact",
                    e,
                )
            })
    }

    async fn register_identity(&self, identity: &str, contact: &str) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO identities (id, contact, created_at) VALUES ($1, $2, NOW()) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(identity)
        .bind(contact)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceFailure,
                "Failed to register identity",
                e,
            )
        })?;
        Ok(())
    }

    async fn rotate(
        &self,
        consumed_id: Uuid,
        at: DateTime<Utc>,
        replacement: &RefreshRecord,
    ) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let claim = sqlx::query(
            "UPDATE refresh_tokens SET consumed_at = $2 WHERE id = $1 AND consumed_at IS NULL",
        )
        .bind(consumed_id)
        .bind(at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceFailure,
                "Failed to claim refresh record",
                e,
            )
        })?;

        if claim.rows_affected() != 1 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO refresh_tokens \
             (id, identity, secret_hash, lookup_key, bound_address, issued_at, expires_at, consumed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(replacement.id)
        .bind(&replacement.identity)
        .bind(&replacement.secret_hash)
        .bind(&replacement.lookup_key)
        .bind(&replacement.bound_address)
        .bind(replacement.issued_at)
        .bind(replacement.expires_at)
        .bind(replacement.consumed_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceFailure,
                "Failed to save rotated refresh record",
                e,
            )
        })?;

        // Dropping `tx` on any error above rolls the claim back.
        tx.commit().await?;
        Ok(true)
    }
}

/// Replace the password in a connection URL with `****`.
fn redact_credentials(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host)) = rest.split_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:****@{host}"),
        None => url.to_string(),
    }
}
