//! PostgreSQL-backed [`ProjectRepository`] implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Project;
use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};

use super::models::{NewProjectRow, ProjectRow, ProjectRowChanges};
use super::pool::{DbPool, PoolError};
use super::schema::projects;

/// Diesel-backed implementation of the [`ProjectRepository`] port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProjectRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ProjectRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ProjectRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ProjectRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => ProjectRepositoryError::query("record not found"),
        _ => ProjectRepositoryError::query("database error"),
    }
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn list_newest_first(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProjectRow> = projects::table
            .order(projects::created_at.desc())
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProjectRow> = projects::table
            .filter(projects::id.eq(id))
            .select(ProjectRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Project::from))
    }

    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewProjectRow {
            id: project.id,
            title: &project.title,
            description: &project.description,
            image: &project.image,
            tags: project.tags.as_slice(),
            live_link: project.live_link.as_deref(),
            code_link: project.code_link.as_deref(),
            created_at: project.created_at,
            updated_at: project.updated_at,
        };
        diesel::insert_into(projects::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = ProjectRowChanges {
            title: &project.title,
            description: &project.description,
            image: &project.image,
            tags: project.tags.as_slice(),
            live_link: project.live_link.as_deref(),
            code_link: project.code_link.as_deref(),
            updated_at: project.updated_at,
        };
        diesel::update(projects::table.filter(projects::id.eq(project.id)))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(projects::table.filter(projects::id.eq(id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
