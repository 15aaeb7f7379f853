//! Access credential verification for downstream consumers.

use jsonwebtoken::{DecodingKey, Validation, decode};

use authpair_core::error::AppError;
use authpair_core::result::AppResult;

use super::SIGNING_ALGORITHM;
use super::claims::AccessClaims;

/// Validates access credentials signed by [`AccessTokenSigner`](super::AccessTokenSigner).
#[derive(Clone)]
pub struct AccessTokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for AccessTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AccessTokenVerifier {
    /// Creates a verifier for the given key.
    pub fn new(signing_key: &str) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 5; // clock skew

        Self {
            decoding_key: DecodingKey::from_secret(signing_key.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access credential.
    pub fn verify(&self, token: &str) -> AppResult<AccessClaims> {
        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid token signature")
                }
                _ => AppError::unauthorized(format!("Token validation failed: {e}")),
            })?;

        Ok(token_data.claims)
    }
}
