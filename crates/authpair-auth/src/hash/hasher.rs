//! bcrypt hashing and verification of refresh secrets.

use authpair_core::error::{AppError, ErrorKind};
use authpair_core::result::AppResult;
use authpair_core::traits::SecretHasher;

/// bcrypt only reads the first 72 bytes of its input.
pub const BCRYPT_MAX_SECRET_LEN: usize = 72;

/// Input hashed at construction so malformed digests can be answered in
/// the same time as a genuine mismatch.
const TIMING_PROBE: &str = "authpair-timing-probe";

/// Hashes refresh secrets with bcrypt at a fixed cost.
#[derive(Clone)]
pub struct BcryptHasher {
    /// bcrypt work factor.
    cost: u32,
    /// Valid digest at `cost`, verified against when a stored digest is unparsable.
    probe_digest: String,
}

impl std::fmt::Debug for BcryptHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BcryptHasher")
            .field("cost", &self.cost)
            .finish()
    }
}

impl BcryptHasher {
    /// Creates a hasher with the given bcrypt cost.
    pub fn new(cost: u32) -> AppResult<Self> {
        let probe_digest = bcrypt::hash(TIMING_PROBE, cost).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid bcrypt cost {cost}: {e}"),
                e,
            )
        })?;

        Ok(Self { cost, probe_digest })
    }

    /// Returns the configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl SecretHasher for BcryptHasher {
    fn max_secret_len(&self) -> usize {
        BCRYPT_MAX_SECRET_LEN
    }

    fn hash(&self, secret: &str) -> AppResult<String> {
        if secret.len() > BCRYPT_MAX_SECRET_LEN {
            return Err(AppError::hashing(format!(
                "Secret is {} bytes; bcrypt accepts at most {BCRYPT_MAX_SECRET_LEN}",
                secret.len()
            )));
        }

        bcrypt::hash(secret, self.cost).map_err(|e| {
            AppError::with_source(ErrorKind::HashingFailure, format!("bcrypt failed: {e}"), e)
        })
    }

    fn verify(&self, secret: &str, digest: &str) -> bool {
        match bcrypt::verify(secret, digest) {
            Ok(matched) => matched,
            Err(_) => {
                let _ = bcrypt::verify(secret, &self.probe_digest);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> BcryptHasher {
        BcryptHasher::new(4).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let h = hasher();
        let digest = h.hash("refresh-secret").unwrap();
        assert_ne!(digest, "refresh-secret");
        assert!(h.verify("refresh-secret", &digest));
        assert!(!h.verify("other-secret", &digest));
    }

    #[test]
    fn test_hash_is_salted() {
        let h = hasher();
        let a = h.hash("same").unwrap();
        let b = h.hash("same").unwrap();
        assert_ne!(a, b);
        assert!(h.verify("same", &a));
        assert!(h.verify("same", &b));
    }

    #[test]
    fn test_rejects_oversized_secret() {
        let h = hasher();
        assert!(h.hash(&"a".repeat(BCRYPT_MAX_SECRET_LEN)).is_ok());

        let err = h.hash(&"a".repeat(BCRYPT_MAX_SECRET_LEN + 1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::HashingFailure);
    }

    #[test]
    fn test_malformed_digest_is_a_mismatch() {
        let h = hasher();
        assert!(!h.verify("secret", "not-a-bcrypt-digest"));
        assert!(!h.verify("secret", ""));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let err = BcryptHasher::new(2).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
