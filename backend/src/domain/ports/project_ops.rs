//! Driving ports for project reads and mutations.
//!
//! Projects are global: mutations require the authorization gate (enforced
//! by the inbound adapter) but carry no per-record owner.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Project, ProjectDraft, ProjectPatch};

/// Read-side port for projects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectsQuery: Send + Sync {
    /// Every project, newest first.
    async fn list(&self) -> Result<Vec<Project>, Error>;
}

/// Write-side port for projects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectsCommand: Send + Sync {
    /// Create a project from a normalized draft.
    async fn add(&self, draft: ProjectDraft) -> Result<Project, Error>;

    /// Merge a patch into an existing project.
    async fn update(&self, id: Uuid, patch: ProjectPatch) -> Result<Project, Error>;

    /// Remove a project.
    async fn delete(&self, id: Uuid) -> Result<(), Error>;
}
