//! Cryptographic utilities shared across Showcase crates
//!
//! Provides password hashing and verification using SHA-256 with random
//! salts and constant-time comparison to prevent timing attacks.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Hash a password with a freshly generated random salt.
///
/// The stored format is `hex(salt):hex(sha256(password || salt))`.
pub fn hash_password(password: &str) -> String {
    let salt: [u8; 32] = rand::thread_rng().gen();
    hash_with_salt(password, &salt)
}

fn hash_with_salt(password: &str, salt: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt);
    let hash = hasher.finalize();

    format!("{}:{}", hex::encode(salt), hex::encode(hash))
}

/// Verify a password against a stored hash using constant-time comparison.
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    let parts: Vec<&str> = stored_hash.split(':').collect();
    if parts.len() != 2 {
        return false;
    }

    let salt = match hex::decode(parts[0]) {
        Ok(salt) => salt,
        Err(_) => return false,
    };

    let hash = match hex::decode(parts[1]) {
        Ok(hash) => hash,
        Err(_) => return false,
    };

    let mut hasher = Sha256::new();
    hasher.update(candidate.as_bytes());
    hasher.update(&salt);
    let candidate_hash = hasher.finalize();

    // Constant-time comparison to prevent timing attacks
    if hash.len() != candidate_hash.len() {
        return false;
    }

    let mut result = 0u8;
    for (a, b) in hash.iter().zip(candidate_hash.iter()) {
        result |= a ^ b;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let stored = hash_password("correct horse battery staple");
        assert!(verify_password("correct horse battery staple", &stored));
        assert!(!verify_password("correct horse battery stapler", &stored));
    }

    #[test]
    fn test_hash_format() {
        let stored = hash_password("secret");
        let parts: Vec<&str> = stored.split(':').collect();
        assert_eq!(parts.len(), 2);
        assert!(hex::decode(parts[0]).is_ok());
        // SHA-256 digest = 32 bytes = 64 hex chars
        assert_eq!(parts[1].len(), 64);
    }

    #[test]
    fn test_same_password_different_salts() {
        let a = hash_password("secret");
        let b = hash_password("secret");
        assert_ne!(a, b);
        assert!(verify_password("secret", &a));
        assert!(verify_password("secret", &b));
    }

    #[test]
    fn test_verify_rejects_malformed_hashes() {
        assert!(!verify_password("secret", ""));
        assert!(!verify_password("secret", "nocolon"));
        assert!(!verify_password("secret", "zz:zz"));
        assert!(!verify_password("secret", "abcd:not-hex"));
    }

    #[test]
    fn test_empty_password_still_salted() {
        let stored = hash_password("");
        assert!(verify_password("", &stored));
        assert!(!verify_password("x", &stored));
    }
}
