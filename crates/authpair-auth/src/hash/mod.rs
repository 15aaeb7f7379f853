//! Refresh secret hashing.

pub mod hasher;

pub use hasher::BcryptHasher;
