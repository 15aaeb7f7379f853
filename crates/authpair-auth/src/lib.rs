//! # authpair-auth
//!
//! Issuance and rotation of paired access/refresh tokens.
//!
//! ## Modules
//!
//! - `hash` — bcrypt digests for refresh secrets
//! - `jwt` — access credential claims, signing, and verification
//! - `secret` — CSPRNG refresh secret generation
//! - `lifecycle` — the issue/refresh state machine
//! - `store` — in-memory token store
//! - `notify` — address-change alert delivery

pub mod hash;
pub mod jwt;
pub mod lifecycle;
pub mod notify;
pub mod secret;
pub mod store;

pub use hash::BcryptHasher;
pub use jwt::{AccessClaims, AccessTokenSigner, AccessTokenVerifier};
pub use lifecycle::{LifecycleConfig, TokenLifecycle};
pub use notify::{LogNotifier, WebhookNotifier, build_notifier};
pub use store::MemoryTokenStore;
