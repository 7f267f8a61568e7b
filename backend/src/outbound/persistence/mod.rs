//! Diesel/PostgreSQL persistence adapters.
//!
//! Each repository implements a driven port from `domain::ports`, mapping
//! pool and Diesel errors into the port's error enum. Embedded migrations
//! are run once at startup.

pub mod models;
pub mod pool;
pub mod schema;

mod diesel_contact_repository;
mod diesel_profile_repository;
mod diesel_project_repository;
mod diesel_skill_repository;

pub use diesel_contact_repository::DieselContactRepository;
pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_skill_repository::DieselSkillRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// SQL migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run pending migrations against `database_url`.
///
/// Uses a short-lived synchronous connection: migrations happen once at
/// startup, before the async pool takes over.
///
/// # Errors
///
/// Returns [`PoolError::Build`] when connecting or migrating fails.
pub fn run_migrations(database_url: &str) -> Result<(), PoolError> {
    let mut conn =
        PgConnection::establish(database_url).map_err(|err| PoolError::build(err.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|err| PoolError::build(err.to_string()))
}
