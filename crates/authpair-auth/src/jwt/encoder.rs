//! Access credential signing.

use jsonwebtoken::{EncodingKey, Header, encode};

use authpair_core::error::{AppError, ErrorKind};
use authpair_core::result::AppResult;

use super::SIGNING_ALGORITHM;
use super::claims::AccessClaims;

/// Signs access credentials with the process-wide symmetric key.
#[derive(Clone)]
pub struct AccessTokenSigner {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for AccessTokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenSigner")
            .field("algorithm", &SIGNING_ALGORITHM)
            .finish()
    }
}

impl AccessTokenSigner {
    /// Creates a signer. An empty key is a configuration error.
    pub fn new(signing_key: &str) -> AppResult<Self> {
        if signing_key.is_empty() {
            return Err(AppError::configuration("Signing key must not be empty"));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(signing_key.as_bytes()),
        })
    }

    /// Encodes and signs `claims`.
    pub fn sign(&self, claims: &AccessClaims) -> AppResult<String> {
        encode(&Header::new(SIGNING_ALGORITHM), claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(
                ErrorKind::SigningFailure,
                format!("Failed to sign access token: {e}"),
                e,
            )
        })
    }
}
