//! Contact inbox service: durable submission with best-effort notification.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{
    ContactNotifier, ContactRepository, ContactRepositoryError, ContactsCommand, ContactsQuery,
    NotifierError,
};
use crate::domain::{ContactMessage, ContactSubmission, Error, MessageStatus};

/// Domain service for the contact-message inbox.
///
/// The notifier is a trait object because deployments swap it at runtime
/// (SMTP when configured, disabled otherwise).
#[derive(Clone)]
pub struct ContactService<R> {
    repo: Arc<R>,
    notifier: Arc<dyn ContactNotifier>,
    notification_email: String,
}

impl<R> ContactService<R> {
    /// Create a new service. `notification_email` is the inbox address
    /// notifications are sent to and recorded against each message.
    pub fn new(
        repo: Arc<R>,
        notifier: Arc<dyn ContactNotifier>,
        notification_email: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            notifier,
            notification_email: notification_email.into(),
        }
    }
}

fn map_repo_error(error: ContactRepositoryError) -> Error {
    match error {
        ContactRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("contact repository unavailable: {message}"))
        }
        ContactRepositoryError::Query { message } => {
            Error::internal(format!("contact repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> ContactsQuery for ContactService<R>
where
    R: ContactRepository,
{
    async fn list(&self) -> Result<Vec<ContactMessage>, Error> {
        self.repo.list_newest_first().await.map_err(map_repo_error)
    }
}

#[async_trait]
impl<R> ContactsCommand for ContactService<R>
where
    R: ContactRepository,
{
    async fn submit(&self, submission: ContactSubmission) -> Result<ContactMessage, Error> {
        let ContactSubmission {
            name,
            email,
            subject,
            message,
        } = submission;
        let mut record = ContactMessage {
            id: Uuid::new_v4(),
            name,
            email,
            subject,
            message,
            status: MessageStatus::New,
            notification_sent: false,
            notification_email: self.notification_email.clone(),
            created_at: Utc::now(),
        };

        // The submission must be durable before any notification attempt:
        // a dead SMTP relay loses the email, never the message.
        self.repo.insert(&record).await.map_err(map_repo_error)?;

        match self.notifier.notify(&record).await {
            Ok(()) => {
                if let Err(err) = self.repo.mark_notification_sent(record.id).await {
                    warn!(id = %record.id, error = %err, "notification sent but flag not recorded");
                } else {
                    record.notification_sent = true;
                }
            }
            Err(NotifierError::NotConfigured) => {
                warn!(id = %record.id, "contact notification skipped: transport not configured");
            }
            Err(err) => {
                warn!(id = %record.id, error = %err, "contact notification failed");
            }
        }

        Ok(record)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: MessageStatus,
    ) -> Result<ContactMessage, Error> {
        let mut record = self
            .repo
            .find_by_id(id)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("contact message not found"))?;
        self.repo
            .update_status(id, status)
            .await
            .map_err(map_repo_error)?;
        record.status = status;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{DisabledContactNotifier, MockContactNotifier, MockContactRepository};

    fn submission() -> ContactSubmission {
        ContactSubmission::try_from_parts("Ada", "ada@example.com", "Hello", "Hi there")
            .expect("valid submission")
    }

    #[tokio::test]
    async fn submit_is_durable_when_notification_fails() {
        let mut repo = MockContactRepository::new();
        repo.expect_insert().times(1).return_once(|_| Ok(()));
        repo.expect_mark_notification_sent().times(0);

        let mut notifier = MockContactNotifier::new();
        notifier
            .expect_notify()
            .times(1)
            .return_once(|_| Err(NotifierError::send("relay unreachable")));

        let service = ContactService::new(Arc::new(repo), Arc::new(notifier), "hello@example.com");
        let record = service.submit(submission()).await.expect("submitted");
        assert!(!record.notification_sent);
        assert_eq!(record.status, MessageStatus::New);
    }

    #[tokio::test]
    async fn submit_records_notification_success() {
        let mut repo = MockContactRepository::new();
        repo.expect_insert().times(1).return_once(|_| Ok(()));
        repo.expect_mark_notification_sent()
            .times(1)
            .return_once(|_| Ok(()));

        let mut notifier = MockContactNotifier::new();
        notifier.expect_notify().times(1).return_once(|_| Ok(()));

        let service = ContactService::new(Arc::new(repo), Arc::new(notifier), "hello@example.com");
        let record = service.submit(submission()).await.expect("submitted");
        assert!(record.notification_sent);
    }

    #[tokio::test]
    async fn submit_with_disabled_notifier_still_persists() {
        let mut repo = MockContactRepository::new();
        repo.expect_insert().times(1).return_once(|_| Ok(()));
        repo.expect_mark_notification_sent().times(0);

        let service = ContactService::new(
            Arc::new(repo),
            Arc::new(DisabledContactNotifier),
            "hello@example.com",
        );
        let record = service.submit(submission()).await.expect("submitted");
        assert!(!record.notification_sent);
        assert_eq!(record.notification_email, "hello@example.com");
    }

    #[tokio::test]
    async fn submit_fails_when_persistence_fails() {
        let mut repo = MockContactRepository::new();
        repo.expect_insert()
            .times(1)
            .return_once(|_| Err(ContactRepositoryError::connection("db down")));

        let mut notifier = MockContactNotifier::new();
        notifier.expect_notify().times(0);

        let service = ContactService::new(Arc::new(repo), Arc::new(notifier), "hello@example.com");
        let error = service.submit(submission()).await.expect_err("fails");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn update_status_of_absent_message_is_not_found() {
        let mut repo = MockContactRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
        repo.expect_update_status().times(0);

        let service = ContactService::new(
            Arc::new(repo),
            Arc::new(DisabledContactNotifier),
            "hello@example.com",
        );
        let error = service
            .update_status(Uuid::new_v4(), MessageStatus::Completed)
            .await
            .expect_err("not found");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn update_status_overwrites_unconditionally() {
        let id = Uuid::new_v4();
        let mut repo = MockContactRepository::new();
        repo.expect_find_by_id().times(1).return_once(move |_| {
            Ok(Some(ContactMessage {
                id,
                name: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
                subject: "Hello".to_owned(),
                message: "Hi".to_owned(),
                status: MessageStatus::Completed,
                notification_sent: false,
                notification_email: "hello@example.com".to_owned(),
                created_at: Utc::now(),
            }))
        });
        repo.expect_update_status()
            .times(1)
            .withf(|_, status| *status == MessageStatus::New)
            .return_once(|_, _| Ok(()));

        let service = ContactService::new(
            Arc::new(repo),
            Arc::new(DisabledContactNotifier),
            "hello@example.com",
        );
        // Completed back to new: transitions are unordered by design.
        let record = service
            .update_status(id, MessageStatus::New)
            .await
            .expect("updated");
        assert_eq!(record.status, MessageStatus::New);
    }
}
