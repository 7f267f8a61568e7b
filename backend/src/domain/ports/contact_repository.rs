//! Port for contact-message persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ContactMessage, MessageStatus};

/// Persistence errors raised by contact repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactRepositoryError {
    /// Repository connection could not be established.
    #[error("contact repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("contact repository query failed: {message}")]
    Query { message: String },
}

impl ContactRepositoryError {
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

/// Port for the contact-message inbox. Messages are never deleted through
/// this port; triage happens by overwriting the status.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert a freshly submitted message.
    async fn insert(&self, message: &ContactMessage) -> Result<(), ContactRepositoryError>;

    /// Every stored message, `created_at` descending.
    async fn list_newest_first(&self) -> Result<Vec<ContactMessage>, ContactRepositoryError>;

    /// Fetch a message by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContactMessage>, ContactRepositoryError>;

    /// Overwrite the status of an existing message.
    async fn update_status(
        &self,
        id: Uuid,
        status: MessageStatus,
    ) -> Result<(), ContactRepositoryError>;

    /// Record that the best-effort notification for `id` succeeded.
    async fn mark_notification_sent(&self, id: Uuid) -> Result<(), ContactRepositoryError>;
}

/// Fixture implementation for tests that never touch the inbox.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContactRepository;

#[async_trait]
impl ContactRepository for FixtureContactRepository {
    async fn insert(&self, _message: &ContactMessage) -> Result<(), ContactRepositoryError> {
        Ok(())
    }

    async fn list_newest_first(&self) -> Result<Vec<ContactMessage>, ContactRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: Uuid,
    ) -> Result<Option<ContactMessage>, ContactRepositoryError> {
        Ok(None)
    }

    async fn update_status(
        &self,
        _id: Uuid,
        _status: MessageStatus,
    ) -> Result<(), ContactRepositoryError> {
        Ok(())
    }

    async fn mark_notification_sent(&self, _id: Uuid) -> Result<(), ContactRepositoryError> {
        Ok(())
    }
}
