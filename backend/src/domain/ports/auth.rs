//! Driving ports for login and the authorization gate.
//!
//! Inbound adapters call these to authenticate without knowing the backing
//! infrastructure, which keeps handler tests deterministic: a test double
//! replaces the whole credential stack.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginOutcome, ProfileId};

/// Domain use-case port for the admin login operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue the stateless bearer token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}

/// Domain use-case port for resolving a presented bearer token to a caller.
///
/// Fails closed: a missing, malformed, expired, or dangling token is always
/// `Unauthorized`. Verification is read-only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenAuthenticator: Send + Sync {
    /// Resolve `token` to the profile it references, confirming the
    /// profile still exists.
    async fn authenticate(&self, token: &str) -> Result<ProfileId, Error>;
}
