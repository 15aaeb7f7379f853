//! # authpair-database
//!
//! The PostgreSQL-backed [`TokenStore`](authpair_core::traits::TokenStore),
//! including pool setup and the embedded schema migrations.

pub mod repositories;

pub use repositories::PgTokenStore;
