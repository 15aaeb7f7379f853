//! Token handlers — issue and refresh.

use axum::Json;
use axum::extract::State;
use tracing::info;

use authpair_core::result::AppResult;
use authpair_core::types::Identity;

use crate::dto::request::{IssueRequest, RefreshRequest};
use crate::dto::response::TokenResponse;
use crate::error::ApiError;
use crate::extractors::{ClientAddr, ValidatedJson};
use crate::state::AppState;

/// POST /auth/tokens
pub async fn issue_tokens(
    State(state): State<AppState>,
    client: ClientAddr,
    ValidatedJson(req): ValidatedJson<IssueRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    info!(user_id = %req.user_id, client_ip = %client.as_str(), "Token issuance requested");

    if state.config.auth.auto_provision_identities {
        ensure_identity(&state, &req.user_id).await?;
    }

    let tokens = state.lifecycle.issue(&req.user_id, client.as_str()).await?;

    Ok(Json(tokens.into()))
}

/// POST /auth/refresh
pub async fn refresh_tokens(
    State(state): State<AppState>,
    client: ClientAddr,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    info!(client_ip = %client.as_str(), "Token refresh requested");

    let tokens = state
        .lifecycle
        .refresh(&req.refresh_token, client.as_str())
        .await?;

    Ok(Json(tokens.into()))
}

/// Registers an unknown identity with a placeholder contact so that
/// address-change alerts have somewhere to go.
async fn ensure_identity(state: &AppState, user_id: &str) -> AppResult<()> {
    let store = state.lifecycle.store();

    if store.find_identity_contact(user_id).await?.is_some() {
        return Ok(());
    }

    let contact =
        Identity::placeholder_contact(user_id, &state.config.auth.placeholder_contact_domain);
    store.register_identity(user_id, &contact).await?;

    info!(user_id = %user_id, contact = %contact, "Identity provisioned");
    Ok(())
}
