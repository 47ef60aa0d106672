//! Prompt fingerprints, logged at start-up so answers can be tied to the
//! prompt revision that produced them.

use std::fmt::Write;

use sha2::{Digest, Sha256};

/// Number of hex characters kept by [`hash_prompt`].
const FINGERPRINT_LEN: usize = 16;

/// Compute a short, stable SHA-256 fingerprint for a prompt string.
///
/// Leading and trailing whitespace is ignored so that a prompt loaded from a
/// file hashes the same as the embedded copy.
pub fn hash_prompt(prompt: &str) -> String {
    let digest = Sha256::digest(prompt.trim().as_bytes());
    let mut hex = String::with_capacity(FINGERPRINT_LEN);
    for byte in digest.iter().take(FINGERPRINT_LEN / 2) {
        let _ = write!(hex, "{:02x}", byte);
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::hash_prompt;

    #[test]
    fn test_hash_prompt_stable() {
        assert_eq!(hash_prompt("classify this"), hash_prompt("classify this"));
        assert_ne!(hash_prompt("classify this"), hash_prompt("answer this"));
    }

    #[test]
    fn test_hash_prompt_ignores_surrounding_whitespace() {
        assert_eq!(hash_prompt("  prompt\n"), hash_prompt("prompt"));
    }

    #[test]
    fn test_hash_prompt_length() {
        assert_eq!(hash_prompt("anything").len(), 16);
    }
}
