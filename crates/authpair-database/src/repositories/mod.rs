//! PostgreSQL repository implementations.

pub mod token;

pub use token::PgTokenStore;
