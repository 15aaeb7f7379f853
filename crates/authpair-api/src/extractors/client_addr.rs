//! `ClientAddr` extractor — resolves the caller's network address.
//!
//! Resolution order: first entry of `X-Forwarded-For`, then `X-Real-IP`
//! (both only when proxy headers are trusted), then the socket peer.
//! Any port suffix is stripped.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;

use crate::state::AppState;

/// Address recorded when neither headers nor the socket yield one.
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// The caller's address, port stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddr(pub String);

impl ClientAddr {
    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<AppState> for ClientAddr {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.config.server.trust_proxy_headers
            && let Some(addr) = forwarded_address(&parts.headers)
        {
            return Ok(Self(addr));
        }

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string());

        Ok(Self(peer))
    }
}

/// Reads the proxy-supplied client address, if any.
pub fn forwarded_address(headers: &HeaderMap) -> Option<String> {
    // "client, proxy1, proxy2" -> client
    if let Some(value) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok())
        && let Some(first) = value.split(',').next()
        && !first.trim().is_empty()
    {
        return Some(strip_port(first));
    }

    if let Some(value) = headers.get("x-real-ip").and_then(|v| v.to_str().ok())
        && !value.trim().is_empty()
    {
        return Some(strip_port(value));
    }

    None
}

/// Removes a trailing `:port` from an address, handling bracketed IPv6.
pub fn strip_port(raw: &str) -> String {
    let raw = raw.trim();

    if let Ok(ip) = raw.parse::<IpAddr>() {
        return ip.to_string();
    }
    if let Ok(addr) = raw.parse::<SocketAddr>() {
        return addr.ip().to_string();
    }
    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        return inner.to_string();
    }

    // Hostnames and other opaque values: drop a single numeric port.
    match raw.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') && port.parse::<u16>().is_ok() => {
            host.to_string()
        }
        _ => raw.to_string(),
    }
}
