//! PostgreSQL-backed [`ContactRepository`] implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{ContactMessage, MessageStatus};

use super::models::{ContactMessageRow, NewContactMessageRow};
use super::pool::{DbPool, PoolError};
use super::schema::contact_messages;

/// Diesel-backed implementation of the [`ContactRepository`] port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ContactRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ContactRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ContactRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => ContactRepositoryError::query("record not found"),
        _ => ContactRepositoryError::query("database error"),
    }
}

fn row_to_message(row: ContactMessageRow) -> Result<ContactMessage, ContactRepositoryError> {
    ContactMessage::try_from(row).map_err(|err| ContactRepositoryError::query(err.to_string()))
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn insert(&self, message: &ContactMessage) -> Result<(), ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewContactMessageRow {
            id: message.id,
            name: &message.name,
            email: &message.email,
            subject: &message.subject,
            message: &message.message,
            status: message.status.as_str(),
            notification_sent: message.notification_sent,
            notification_email: &message.notification_email,
            created_at: message.created_at,
        };
        diesel::insert_into(contact_messages::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_newest_first(&self) -> Result<Vec<ContactMessage>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ContactMessageRow> = contact_messages::table
            .order(contact_messages::created_at.desc())
            .select(ContactMessageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_message).collect()
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ContactMessage>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ContactMessageRow> = contact_messages::table
            .filter(contact_messages::id.eq(id))
            .select(ContactMessageRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_message).transpose()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: MessageStatus,
    ) -> Result<(), ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(contact_messages::table.filter(contact_messages::id.eq(id)))
            .set(contact_messages::status.eq(status.as_str()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn mark_notification_sent(&self, id: Uuid) -> Result<(), ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(contact_messages::table.filter(contact_messages::id.eq(id)))
            .set(contact_messages::notification_sent.eq(true))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
