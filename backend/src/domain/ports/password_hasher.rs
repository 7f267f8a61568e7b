//! Port for one-way password hashing.
//!
//! Hashing is pure computation, so the port is synchronous; the Argon2
//! adapter lives in `outbound::auth`.

/// Errors raised by password hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// Hashing or hash parsing failed.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
}

impl PasswordHashError {
    /// Create a hash error with the given message.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }
}

/// Port for one-way password storage and comparison.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage.
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError>;

    /// Verify a plaintext password against a stored hash. A mismatch is
    /// `Ok(false)`, not an error.
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordHashError>;
}

/// Fixture hasher for unit tests: "hashes" by prefixing, never use outside
/// tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

const FIXTURE_PREFIX: &str = "hashed:";

impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        Ok(format!("{FIXTURE_PREFIX}{plaintext}"))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordHashError> {
        Ok(hash.strip_prefix(FIXTURE_PREFIX) == Some(plaintext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fixture_round_trips() {
        let hasher = FixturePasswordHasher;
        let hash = hasher.hash("secret").expect("hash");
        assert!(hasher.verify("secret", &hash).expect("verify"));
        assert!(!hasher.verify("wrong", &hash).expect("verify"));
    }
}
