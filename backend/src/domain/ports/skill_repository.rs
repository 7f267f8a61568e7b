//! Port for skill persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ProfileId, Skill};

/// Persistence errors raised by skill repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkillRepositoryError {
    /// Repository connection could not be established.
    #[error("skill repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("skill repository query failed: {message}")]
    Query { message: String },
}

impl SkillRepositoryError {
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
}

/// Port for skill storage. Listings are ordered by name ascending.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// All skills belonging to `owner`, name ascending.
    async fn list_by_owner(&self, owner: ProfileId) -> Result<Vec<Skill>, SkillRepositoryError>;

    /// Every stored skill, name ascending; feeds the public site.
    async fn list_all(&self) -> Result<Vec<Skill>, SkillRepositoryError>;

    /// Fetch a skill by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Skill>, SkillRepositoryError>;

    /// Insert a new skill.
    async fn insert(&self, skill: &Skill) -> Result<(), SkillRepositoryError>;

    /// Persist the full skill row, replacing the stored one.
    async fn update(&self, skill: &Skill) -> Result<(), SkillRepositoryError>;

    /// Remove a skill. Removing an absent id is not an error here; the
    /// service decides how to report it.
    async fn delete(&self, id: Uuid) -> Result<(), SkillRepositoryError>;
}

/// Fixture implementation for tests that never touch skills.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSkillRepository;

#[async_trait]
impl SkillRepository for FixtureSkillRepository {
    async fn list_by_owner(&self, _owner: ProfileId) -> Result<Vec<Skill>, SkillRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_all(&self) -> Result<Vec<Skill>, SkillRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Skill>, SkillRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _skill: &Skill) -> Result<(), SkillRepositoryError> {
        Ok(())
    }

    async fn update(&self, _skill: &Skill) -> Result<(), SkillRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), SkillRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_listings_are_empty() {
        let repo = FixtureSkillRepository;
        assert!(repo.list_all().await.expect("list_all").is_empty());
        assert!(
            repo.list_by_owner(ProfileId::random())
                .await
                .expect("list_by_owner")
                .is_empty()
        );
    }
}
