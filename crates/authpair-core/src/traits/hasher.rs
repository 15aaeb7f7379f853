//! One-way hashing of refresh secrets.

use crate::result::AppResult;

/// Adaptive one-way hash for opaque refresh secrets.
///
/// Digests are salted, so hashing the same secret twice yields different
/// strings that both verify.
pub trait SecretHasher: Send + Sync + std::fmt::Debug + 'static {
    /// Largest secret, in bytes, the algorithm accepts.
    fn max_secret_len(&self) -> usize;

    /// Produce a verification digest. Fails with `HashingFailure` when the
    /// secret exceeds [`max_secret_len`](Self::max_secret_len).
    fn hash(&self, secret: &str) -> AppResult<String>;

    /// `true` iff `digest` was produced from `secret`.
    ///
    /// A malformed digest verifies as `false`, indistinguishable from a
    /// wrong secret.
    fn verify(&self, secret: &str, digest: &str) -> bool;
}
