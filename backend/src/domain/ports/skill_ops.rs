//! Driving ports for skill reads and mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, ProfileId, Skill, SkillLevel, SkillPatch};

/// Read-side port for skills.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillsQuery: Send + Sync {
    /// The caller's skills, name ascending.
    async fn list_own(&self, caller: ProfileId) -> Result<Vec<Skill>, Error>;

    /// Every skill regardless of owner, name ascending, for anonymous
    /// display on the single-tenant site.
    async fn list_public(&self) -> Result<Vec<Skill>, Error>;
}

/// Write-side port for skills. Every mutation enforces ownership: a skill
/// whose owner differs from `caller` yields `Forbidden`, never silent
/// success.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillsCommand: Send + Sync {
    /// Create a skill owned by `caller`; the level defaults to 75 and is
    /// clamped into `[0, 100]`.
    async fn add(
        &self,
        caller: ProfileId,
        name: String,
        level: Option<SkillLevel>,
    ) -> Result<Skill, Error>;

    /// Merge a patch into an owned skill.
    async fn update(&self, id: Uuid, caller: ProfileId, patch: SkillPatch) -> Result<Skill, Error>;

    /// Remove an owned skill.
    async fn delete(&self, id: Uuid, caller: ProfileId) -> Result<(), Error>;
}
