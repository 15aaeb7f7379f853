//! Token lifecycle: issuance, refresh validation, and rotation.
//!
//! A refresh secret moves through `issued → {valid, expired,
//! address-mismatch} → superseded`. These states follow from the record's
//! timestamps and bound address at refresh time; only the single-use claim
//! (`consumed_at`) is ever written back.

pub mod config;
pub mod engine;


pub use config::LifecycleConfig;
pub use engine::TokenLifecycle;
