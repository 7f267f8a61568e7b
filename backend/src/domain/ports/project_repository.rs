//! Port for project persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Project;

/// Persistence errors raised by project repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectRepositoryError {
    /// Repository connection could not be established.
    #[error("project repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("project repository query failed: {message}")]
    Query { message: String },
}

impl ProjectRepositoryError {
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

/// Port for project storage. Listings are ordered newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Every stored project, `created_at` descending.
    async fn list_newest_first(&self) -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Fetch a project by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Insert a new project.
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError>;

    /// Persist the full project row, replacing the stored one.
    async fn update(&self, project: &Project) -> Result<(), ProjectRepositoryError>;

    /// Remove a project.
    async fn delete(&self, id: Uuid) -> Result<(), ProjectRepositoryError>;
}

/// Fixture implementation for tests that never touch projects.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProjectRepository;

#[async_trait]
impl ProjectRepository for FixtureProjectRepository {
    async fn list_newest_first(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _project: &Project) -> Result<(), ProjectRepositoryError> {
        Ok(())
    }

    async fn update(&self, _project: &Project) -> Result<(), ProjectRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), ProjectRepositoryError> {
        Ok(())
    }
}
