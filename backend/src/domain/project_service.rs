//! Project domain service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{
    ProjectRepository, ProjectRepositoryError, ProjectsCommand, ProjectsQuery,
};
use crate::domain::{Error, Project, ProjectDraft, ProjectPatch};

/// Domain service for portfolio projects.
#[derive(Clone)]
pub struct ProjectService<R> {
    repo: Arc<R>,
}

impl<R> ProjectService<R> {
    /// Create a new service with the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_repo_error(error: ProjectRepositoryError) -> Error {
    match error {
        ProjectRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("project repository unavailable: {message}"))
        }
        ProjectRepositoryError::Query { message } => {
            Error::internal(format!("project repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> ProjectsQuery for ProjectService<R>
where
    R: ProjectRepository,
{
    async fn list(&self) -> Result<Vec<Project>, Error> {
        self.repo.list_newest_first().await.map_err(map_repo_error)
    }
}

#[async_trait]
impl<R> ProjectsCommand for ProjectService<R>
where
    R: ProjectRepository,
{
    async fn add(&self, draft: ProjectDraft) -> Result<Project, Error> {
        if draft.title.trim().is_empty() {
            return Err(Error::invalid_request("project title must not be empty"));
        }

        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            image: draft.image,
            tags: draft.tags,
            live_link: draft.live_link,
            code_link: draft.code_link,
            created_at: now,
            updated_at: now,
        };
        self.repo.insert(&project).await.map_err(map_repo_error)?;
        Ok(project)
    }

    async fn update(&self, id: Uuid, patch: ProjectPatch) -> Result<Project, Error> {
        let mut project = self
            .repo
            .find_by_id(id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("project not found"))?;
        patch.apply(&mut project);
        project.updated_at = Utc::now();
        self.repo.update(&project).await.map_err(map_repo_error)?;
        Ok(project)
    }

    async fn delete(&self, id: Uuid) -> Result<(), Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("project not found"))?;
        self.repo.delete(id).await.map_err(map_repo_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::TagsInput;
    use crate::domain::ports::MockProjectRepository;

    fn fixture_project(id: Uuid) -> Project {
        Project {
            id,
            title: "Portfolio".to_owned(),
            description: "A personal site".to_owned(),
            image: "/uploads/projects/p.png".to_owned(),
            tags: vec!["rust".to_owned()],
            live_link: None,
            code_link: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn add_persists_the_normalized_draft() {
        let mut repo = MockProjectRepository::new();
        repo.expect_insert()
            .times(1)
            .withf(|project: &Project| project.tags == vec!["a", "b", "c"])
            .return_once(|_| Ok(()));

        let service = ProjectService::new(Arc::new(repo));
        let draft = ProjectDraft::new(
            "Title",
            "Desc",
            "/img.png",
            TagsInput::Joined("a, b ,c".to_owned()),
            None,
            None,
        );
        let project = service.add(draft).await.expect("added");
        assert_eq!(project.tags, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn add_rejects_blank_titles() {
        let repo = MockProjectRepository::new();
        let service = ProjectService::new(Arc::new(repo));
        let draft = ProjectDraft::new(
            "  ",
            "Desc",
            "/img.png",
            TagsInput::Split(Vec::new()),
            None,
            None,
        );
        let error = service.add(draft).await.expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn update_of_absent_project_is_not_found() {
        let mut repo = MockProjectRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let service = ProjectService::new(Arc::new(repo));
        let error = service
            .update(Uuid::new_v4(), ProjectPatch::default())
            .await
            .expect_err("not found");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn update_renormalizes_tags() {
        let id = Uuid::new_v4();
        let mut repo = MockProjectRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(fixture_project(id))));
        repo.expect_update()
            .times(1)
            .withf(|project: &Project| project.tags == vec!["api", "web"])
            .return_once(|_| Ok(()));

        let service = ProjectService::new(Arc::new(repo));
        let patch = ProjectPatch {
            tags: Some(TagsInput::Joined(" api , web ".to_owned())),
            ..ProjectPatch::default()
        };
        let updated = service.update(id, patch).await.expect("updated");
        assert_eq!(updated.tags, vec!["api", "web"]);
    }

    #[tokio::test]
    async fn delete_of_absent_project_is_not_found() {
        let mut repo = MockProjectRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
        repo.expect_delete().times(0);

        let service = ProjectService::new(Arc::new(repo));
        let error = service.delete(Uuid::new_v4()).await.expect_err("not found");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_removes_existing_projects() {
        let id = Uuid::new_v4();
        let mut repo = MockProjectRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(fixture_project(id))));
        repo.expect_delete().times(1).return_once(|_| Ok(()));

        let service = ProjectService::new(Arc::new(repo));
        service.delete(id).await.expect("deleted");
    }
}
