//! Skill domain service enforcing the ownership invariant.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{SkillRepository, SkillRepositoryError, SkillsCommand, SkillsQuery};
use crate::domain::{Error, ProfileId, Skill, SkillLevel, SkillPatch};

/// Domain service for skills.
#[derive(Clone)]
pub struct SkillService<R> {
    repo: Arc<R>,
}

impl<R> SkillService<R> {
    /// Create a new service with the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_repo_error(error: SkillRepositoryError) -> Error {
    match error {
        SkillRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("skill repository unavailable: {message}"))
        }
        SkillRepositoryError::Query { message } => {
            Error::internal(format!("skill repository error: {message}"))
        }
    }
}

impl<R> SkillService<R>
where
    R: SkillRepository,
{
    /// Fetch a skill and prove the caller owns it.
    ///
    /// Absent id is `NotFound`; an existing skill with a different owner
    /// is `Forbidden`. Nothing about the foreign skill leaks in either
    /// case.
    async fn load_owned(&self, id: Uuid, caller: ProfileId) -> Result<Skill, Error> {
        let skill = self
            .repo
            .find_by_id(id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("skill not found"))?;
        if !skill.is_owned_by(caller) {
            return Err(Error::forbidden("skill belongs to another profile"));
        }
        Ok(skill)
    }
}

#[async_trait]
impl<R> SkillsQuery for SkillService<R>
where
    R: SkillRepository,
{
    async fn list_own(&self, caller: ProfileId) -> Result<Vec<Skill>, Error> {
        self.repo
            .list_by_owner(caller)
            .await
            .map_err(map_repo_error)
    }

    async fn list_public(&self) -> Result<Vec<Skill>, Error> {
        self.repo.list_all().await.map_err(map_repo_error)
    }
}

#[async_trait]
impl<R> SkillsCommand for SkillService<R>
where
    R: SkillRepository,
{
    async fn add(
        &self,
        caller: ProfileId,
        name: String,
        level: Option<SkillLevel>,
    ) -> Result<Skill, Error> {
        let name = name.trim().to_owned();
        if name.is_empty() {
            return Err(Error::invalid_request("skill name must not be empty"));
        }

        let now = Utc::now();
        let skill = Skill {
            id: Uuid::new_v4(),
            owner_id: caller,
            name,
            level: level.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.repo.insert(&skill).await.map_err(map_repo_error)?;
        Ok(skill)
    }

    async fn update(&self, id: Uuid, caller: ProfileId, patch: SkillPatch) -> Result<Skill, Error> {
        let mut skill = self.load_owned(id, caller).await?;
        patch.apply(&mut skill);
        skill.updated_at = Utc::now();
        self.repo.update(&skill).await.map_err(map_repo_error)?;
        Ok(skill)
    }

    async fn delete(&self, id: Uuid, caller: ProfileId) -> Result<(), Error> {
        self.load_owned(id, caller).await?;
        self.repo.delete(id).await.map_err(map_repo_error)
    }
}
