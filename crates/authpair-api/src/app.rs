//! Server runner — binds the listener and serves the router until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use authpair_auth::TokenLifecycle;
use authpair_core::config::AppConfig;
use authpair_core::error::{AppError, ErrorKind};
use authpair_core::result::AppResult;

use crate::router::build_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration and engine.
///
/// Returns once a shutdown signal has been received and in-flight
/// requests have drained.
pub async fn run_server(config: Arc<AppConfig>, lifecycle: Arc<TokenLifecycle>) -> AppResult<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(AppState::new(config, lifecycle));

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    tracing::info!("AuthPair server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    tracing::info!("AuthPair server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
