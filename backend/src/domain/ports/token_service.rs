//! Port for the stateless admin credential.
//!
//! Tokens are opaque strings to the domain; the JWT adapter lives in
//! `outbound::auth`. Every verification failure collapses into a single
//! `Invalid` variant so callers cannot distinguish (and leak) why a token
//! was rejected.

use crate::domain::ProfileId;

/// Errors raised by token service adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenServiceError {
    /// Token could not be issued.
    #[error("token issuance failed: {message}")]
    Issue { message: String },
    /// Token is malformed, has a bad signature, or has expired.
    #[error("token is invalid or expired")]
    Invalid,
}

impl TokenServiceError {
    /// Create an issuance error with the given message.
    pub fn issue(message: impl Into<String>) -> Self {
        Self::Issue {
            message: message.into(),
        }
    }
}

/// Port for issuing and verifying the stateless bearer credential.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token for the authenticated profile.
    fn issue(&self, profile_id: ProfileId) -> Result<String, TokenServiceError>;

    /// Verify a presented token and return the profile id it references.
    fn verify(&self, token: &str) -> Result<ProfileId, TokenServiceError>;
}

/// Fixture token service: tokens are the profile id itself. Test only.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTokenService;

impl TokenService for FixtureTokenService {
    fn issue(&self, profile_id: ProfileId) -> Result<String, TokenServiceError> {
        Ok(profile_id.to_string())
    }

    fn verify(&self, token: &str) -> Result<ProfileId, TokenServiceError> {
        token
            .parse::<uuid::Uuid>()
            .map(ProfileId::from_uuid)
            .map_err(|_| TokenServiceError::Invalid)
    }
}
