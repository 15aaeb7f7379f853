//! Access credential claims, signing, and verification.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::AccessClaims;
pub use decoder::AccessTokenVerifier;
pub use encoder::AccessTokenSigner;

/// Every access credential is signed with HMAC-SHA512.
pub(crate) const SIGNING_ALGORITHM: jsonwebtoken::Algorithm = jsonwebtoken::Algorithm::HS512;
