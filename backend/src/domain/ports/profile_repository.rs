//! Port for singleton-profile persistence adapters.
//!
//! The profile is a single-row configuration store, not a general user
//! table: adapters expose a `find` for "the" profile alongside the keyed
//! lookups the authorization gate and login need.

use async_trait::async_trait;

use crate::domain::{Profile, ProfileId};

/// Persistence errors raised by profile repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileRepositoryError {
    /// Repository connection could not be established.
    #[error("profile repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("profile repository query failed: {message}")]
    Query { message: String },
    /// The username unique constraint would be violated.
    #[error("username {username:?} is already taken")]
    DuplicateUsername { username: String },
}

impl ProfileRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a duplicate-username error for the given username.
    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Self::DuplicateUsername {
            username: username.into(),
        }
    }
}

/// Port for the singleton site-owner record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the singleton profile, if bootstrap has run.
    async fn find(&self) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Fetch the profile by id; used by the authorization gate to confirm
    /// a decoded token still references an existing profile.
    async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Fetch the profile by exact username; used by login.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Insert the bootstrap profile. Fails on a duplicate username.
    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError>;

    /// Persist the full profile row, replacing the stored one.
    async fn update(&self, profile: &Profile) -> Result<(), ProfileRepositoryError>;
}

/// Fixture implementation for tests that never touch the profile.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileRepository;

#[async_trait]
impl ProfileRepository for FixtureProfileRepository {
    async fn find(&self) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(None)
    }

    async fn find_by_id(&self, _id: ProfileId) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(None)
    }

    async fn find_by_username(
        &self,
        _username: &str,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _profile: &Profile) -> Result<(), ProfileRepositoryError> {
        Ok(())
    }

    async fn update(&self, _profile: &Profile) -> Result<(), ProfileRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_lookups_return_none() {
        let repo = FixtureProfileRepository;
        assert!(repo.find().await.expect("find").is_none());
        assert!(
            repo.find_by_username("admin")
                .await
                .expect("find_by_username")
                .is_none()
        );
    }

    #[rstest]
    fn duplicate_username_error_names_the_username() {
        let err = ProfileRepositoryError::duplicate_username("admin");
        assert!(err.to_string().contains("admin"));
    }
}
