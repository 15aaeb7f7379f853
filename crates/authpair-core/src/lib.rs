//! # authpair-core
//!
//! Core crate for AuthPair. Contains the unified error system,
//! configuration schemas, token domain types, and the capability traits
//! implemented by the storage, hashing, and notification crates.
//!
//! This crate has **no** internal dependencies on other AuthPair crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
