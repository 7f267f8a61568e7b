//! Driving ports for the contact-message inbox.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ContactMessage, ContactSubmission, Error, MessageStatus};

/// Read-side port for the inbox; gate-protected at the HTTP boundary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsQuery: Send + Sync {
    /// Every message, newest first.
    async fn list(&self) -> Result<Vec<ContactMessage>, Error>;
}

/// Write-side port for the inbox.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsCommand: Send + Sync {
    /// Persist an anonymous submission and attempt one best-effort
    /// notification. The returned record reflects whether notification
    /// succeeded; the submission is durable either way.
    async fn submit(&self, submission: ContactSubmission) -> Result<ContactMessage, Error>;

    /// Overwrite the status of an existing message. The status enum is
    /// validated upstream; any member may replace any other.
    async fn update_status(&self, id: Uuid, status: MessageStatus)
    -> Result<ContactMessage, Error>;
}
