//! Capability traits defined in `authpair-core` and implemented by other crates.

pub mod hasher;
pub mod notifier;
pub mod store;

pub use hasher::SecretHasher;
pub use notifier::Notifier;
pub use store::TokenStore;
