//! Refresh secret generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;

/// Entropy drawn for every refresh secret (256 bits).
pub const SECRET_BYTES: usize = 32;

/// Generates an unpredictable refresh secret from the OS CSPRNG.
///
/// The secret is URL-safe base64 without padding and never longer than
/// `max_len` bytes.
pub fn generate_refresh_secret(max_len: usize) -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);

    let mut secret = URL_SAFE_NO_PAD.encode(bytes);
    secret.truncate(max_len);
    secret
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_fixed_printable_length() {
        let secret = generate_refresh_secret(72);
        assert_eq!(secret.len(), 43);
        assert!(
            secret
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_truncated_to_bound() {
        assert_eq!(generate_refresh_secret(20).len(), 20);
    }

    #[test]
    fn test_secrets_do_not_repeat() {
        let secrets: HashSet<String> = (0..256).map(|_| generate_refresh_secret(72)).collect();
        assert_eq!(secrets.len(), 256);
    }
}
