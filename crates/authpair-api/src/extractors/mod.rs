//! Custom Axum extractors.

pub mod client_addr;
pub mod json;

pub use client_addr::ClientAddr;
pub use json::ValidatedJson;
