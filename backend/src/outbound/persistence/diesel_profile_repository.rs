//! PostgreSQL-backed [`ProfileRepository`] implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{Profile, ProfileId};

use super::models::{NewProfileRow, ProfileRow, ProfileRowChanges, education_to_json};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

/// Diesel-backed implementation of the [`ProfileRepository`] port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ProfileRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(message = info.message(), "profile unique constraint hit");
            // The only unique column is the username.
            ProfileRepositoryError::duplicate_username(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ProfileRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => ProfileRepositoryError::query("record not found"),
        _ => ProfileRepositoryError::query("database error"),
    }
}

fn row_to_profile(row: ProfileRow) -> Result<Profile, ProfileRepositoryError> {
    Profile::try_from(row).map_err(|err| ProfileRepositoryError::query(err.to_string()))
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find(&self) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProfileRow> = profiles::table
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_profile).transpose()
    }

    async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::id.eq(id.as_uuid()))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_profile).transpose()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::username.eq(username))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_profile).transpose()
    }

    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewProfileRow {
            id: *profile.id.as_uuid(),
            username: profile.username.as_ref(),
            password_hash: &profile.password_hash,
            name: &profile.name,
            email: &profile.email,
            role: &profile.role,
            location: &profile.location,
            github: profile.social.github.as_deref(),
            twitter: profile.social.twitter.as_deref(),
            linkedin: profile.social.linkedin.as_deref(),
            skills: profile.skills.as_slice(),
            education: education_to_json(&profile.education),
            resume_url: profile.resume_url.as_deref(),
            profile_picture: profile.profile_picture.as_deref(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        };

        diesel::insert_into(profiles::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = ProfileRowChanges {
            username: profile.username.as_ref(),
            password_hash: &profile.password_hash,
            name: &profile.name,
            email: &profile.email,
            role: &profile.role,
            location: &profile.location,
            github: profile.social.github.as_deref(),
            twitter: profile.social.twitter.as_deref(),
            linkedin: profile.social.linkedin.as_deref(),
            skills: profile.skills.as_slice(),
            education: education_to_json(&profile.education),
            resume_url: profile.resume_url.as_deref(),
            profile_picture: profile.profile_picture.as_deref(),
            updated_at: profile.updated_at,
        };

        let updated = diesel::update(profiles::table.filter(profiles::id.eq(profile.id.as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(ProfileRepositoryError::query("profile not found for update"));
        }
        Ok(())
    }
}
