//! Token domain types shared by every crate.

pub mod identity;
pub mod token;

pub use identity::Identity;
pub use token::{RefreshRecord, TokenPair, lookup_key};
