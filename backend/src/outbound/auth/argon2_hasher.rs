//! Argon2id password hashing adapter.
//!
//! Argon2id is the OWASP-recommended algorithm for password storage; the
//! PHC string format keeps parameters and salt alongside the digest so
//! verification needs no extra state.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use rand::RngCore;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id implementation of the [`PasswordHasher`] port.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a new hasher with the library's default parameters.
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        let mut salt_bytes = [0_u8; 16];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;

        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hash_and_verify_round_trip() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("admin123").expect("hash");
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("admin123", &hash).expect("verify"));
        assert!(!hasher.verify("wrong", &hash).expect("verify"));
    }

    #[rstest]
    fn hashes_are_salted() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("admin123").expect("hash");
        let second = hasher.hash("admin123").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn malformed_hash_is_an_error_not_a_mismatch() {
        let hasher = Argon2PasswordHasher::new();
        let result = hasher.verify("admin123", "not-a-phc-string");
        assert!(result.is_err());
    }
}
