//! AuthPair Server — paired access/refresh token service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use authpair_auth::{
    AccessTokenSigner, BcryptHasher, LifecycleConfig, MemoryTokenStore, TokenLifecycle,
    build_notifier,
};
use authpair_core::config::{AppConfig, StoreProvider};
use authpair_core::error::AppError;
use authpair_core::traits::{SecretHasher, TokenStore};
use authpair_database::PgTokenStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("AUTHPAIR_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting AuthPair v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Credential primitives ────────────────────────────
    let bcrypt = BcryptHasher::new(config.auth.hash_cost)?;
    tracing::info!(cost = bcrypt.cost(), "Refresh secret hasher initialized");
    let hasher: Arc<dyn SecretHasher> = Arc::new(bcrypt);
    let signer = Arc::new(AccessTokenSigner::new(&config.auth.signing_key)?);

    // ── Step 2: Token store ──────────────────────────────────────
    let (store, pg_store): (Arc<dyn TokenStore>, Option<Arc<PgTokenStore>>) =
        match config.store.provider {
            StoreProvider::Postgres => {
                let pg = PgTokenStore::connect(&config.database, Arc::clone(&hasher)).await?;
                let pg = Arc::new(pg);
                (Arc::clone(&pg) as Arc<dyn TokenStore>, Some(pg))
            }
            StoreProvider::Memory => {
                tracing::warn!("Using in-memory token store; tokens are lost on restart");
                (Arc::new(MemoryTokenStore::new(Arc::clone(&hasher))), None)
            }
        };

    // ── Step 3: Notifications ────────────────────────────────────
    let notifier = build_notifier(&config.notifications)?;
    tracing::info!(provider = ?config.notifications.provider, "Notifier initialized");

    // ── Step 4: Lifecycle engine ─────────────────────────────────
    let lifecycle = Arc::new(TokenLifecycle::new(
        signer,
        hasher,
        store,
        notifier,
        LifecycleConfig::from_config(&config.auth, &config.notifications)?,
    ));

    // ── Step 5: HTTP server ──────────────────────────────────────
    let result = authpair_api::run_server(Arc::new(config), lifecycle).await;

    if let Some(pg_store) = pg_store {
        pg_store.close().await;
    }

    result
}
