//! Port for the best-effort contact notification.
//!
//! Failure here never propagates to the submitter: the contact service
//! logs it and records `notification_sent = false`.

use async_trait::async_trait;

use crate::domain::ContactMessage;

/// Errors raised by notification adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifierError {
    /// No notification transport is configured for this deployment.
    #[error("notification transport is not configured")]
    NotConfigured,
    /// The transport rejected or failed to deliver the notification.
    #[error("notification send failed: {message}")]
    Send { message: String },
}

impl NotifierError {
    /// Create a send error with the given message.
    pub fn send(message: impl Into<String>) -> Self {
        Self::Send {
            message: message.into(),
        }
    }
}

/// Port for delivering a single new-message notification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactNotifier: Send + Sync {
    /// Attempt exactly one delivery for the given stored message.
    async fn notify(&self, message: &ContactMessage) -> Result<(), NotifierError>;
}

/// Default notifier when no transport is configured: every attempt reports
/// [`NotifierError::NotConfigured`], leaving submissions durable but
/// unnotified.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledContactNotifier;

#[async_trait]
impl ContactNotifier for DisabledContactNotifier {
    async fn notify(&self, _message: &ContactMessage) -> Result<(), NotifierError> {
        Err(NotifierError::NotConfigured)
    }
}
