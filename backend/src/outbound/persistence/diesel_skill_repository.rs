//! PostgreSQL-backed [`SkillRepository`] implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{SkillRepository, SkillRepositoryError};
use crate::domain::{ProfileId, Skill};

use super::models::{NewSkillRow, SkillRow, SkillRowChanges};
use super::pool::{DbPool, PoolError};
use super::schema::skills;

/// Diesel-backed implementation of the [`SkillRepository`] port.
#[derive(Clone)]
pub struct DieselSkillRepository {
    pool: DbPool,
}

impl DieselSkillRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SkillRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            SkillRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> SkillRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            SkillRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => SkillRepositoryError::query("record not found"),
        _ => SkillRepositoryError::query("database error"),
    }
}

#[async_trait]
impl SkillRepository for DieselSkillRepository {
    async fn list_by_owner(&self, owner: ProfileId) -> Result<Vec<Skill>, SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SkillRow> = skills::table
            .filter(skills::owner_id.eq(owner.as_uuid()))
            .order(skills::name.asc())
            .select(SkillRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Skill::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<Skill>, SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SkillRow> = skills::table
            .order(skills::name.asc())
            .select(SkillRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Skill::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Skill>, SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<SkillRow> = skills::table
            .filter(skills::id.eq(id))
            .select(SkillRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Skill::from))
    }

    async fn insert(&self, skill: &Skill) -> Result<(), SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewSkillRow {
            id: skill.id,
            owner_id: *skill.owner_id.as_uuid(),
            name: &skill.name,
            level: skill.level.value(),
            created_at: skill.created_at,
            updated_at: skill.updated_at,
        };
        diesel::insert_into(skills::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, skill: &Skill) -> Result<(), SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = SkillRowChanges {
            name: &skill.name,
            level: skill.level.value(),
            updated_at: skill.updated_at,
        };
        diesel::update(skills::table.filter(skills::id.eq(skill.id)))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: Uuid) -> Result<(), SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(skills::table.filter(skills::id.eq(id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("refused"));
        assert!(matches!(err, SkillRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("refused"));
    }
}
