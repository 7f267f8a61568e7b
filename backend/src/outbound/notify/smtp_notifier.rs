//! SMTP delivery of the best-effort contact notification via lettre.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::domain::ContactMessage;
use crate::domain::ports::{ContactNotifier, NotifierError};

/// Default SMTP submission port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Bounded time to wait for the relay before the attempt counts as failed.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// SMTP-backed implementation of the [`ContactNotifier`] port.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    /// Build a notifier for the given relay and mailboxes.
    ///
    /// `from`/`to` accept either bare addresses or `Name <addr>` forms.
    pub fn new(
        host: &str,
        port: Option<u16>,
        username: &str,
        password: &str,
        from: &str,
        to: &str,
    ) -> Result<Self, NotifierError> {
        let from = from
            .parse::<Mailbox>()
            .map_err(|err| NotifierError::send(format!("invalid from address: {err}")))?;
        let to = to
            .parse::<Mailbox>()
            .map_err(|err| NotifierError::send(format!("invalid to address: {err}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|err| NotifierError::send(format!("invalid relay {host:?}: {err}")))?
            .port(port.unwrap_or(DEFAULT_SMTP_PORT))
            .credentials(Credentials::new(username.to_owned(), password.to_owned()))
            .timeout(Some(SEND_TIMEOUT))
            .build();

        Ok(Self {
            transport,
            from,
            to,
        })
    }

    fn build_email(&self, message: &ContactMessage) -> Result<Message, NotifierError> {
        let reply_to = format!("{} <{}>", message.name, message.email)
            .parse::<Mailbox>()
            .or_else(|_| message.email.parse::<Mailbox>());

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(format!("New contact message: {}", message.subject));
        if let Ok(reply_to) = reply_to {
            builder = builder.reply_to(reply_to);
        }

        builder
            .body(format!(
                "From: {} <{}>\n\n{}",
                message.name, message.email, message.message
            ))
            .map_err(|err| NotifierError::send(format!("message build failed: {err}")))
    }
}

#[async_trait]
impl ContactNotifier for SmtpNotifier {
    async fn notify(&self, message: &ContactMessage) -> Result<(), NotifierError> {
        let email = self.build_email(message)?;
        self.transport
            .send(email)
            .await
            .map_err(|err| NotifierError::send(err.to_string()))?;
        debug!(id = %message.id, "contact notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    use crate::domain::MessageStatus;

    fn notifier() -> SmtpNotifier {
        SmtpNotifier::new(
            "smtp.example.com",
            None,
            "mailer",
            "secret",
            "Portfolio <noreply@example.com>",
            "hello@example.com",
        )
        .expect("valid notifier config")
    }

    fn fixture_message() -> ContactMessage {
        ContactMessage {
            id: Uuid::new_v4(),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            subject: "Collaboration".to_owned(),
            message: "Hello!".to_owned(),
            status: MessageStatus::New,
            notification_sent: false,
            notification_email: "hello@example.com".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn builds_a_deliverable_email() {
        let email = notifier()
            .build_email(&fixture_message())
            .expect("email builds");
        let raw = String::from_utf8(email.formatted()).expect("utf8");
        assert!(raw.contains("New contact message: Collaboration"));
        assert!(raw.contains("hello@example.com"));
    }

    #[rstest]
    fn rejects_an_unparseable_relay_host() {
        let result = SmtpNotifier::new(
            "not a host",
            None,
            "u",
            "p",
            "noreply@example.com",
            "hello@example.com",
        );
        assert!(result.is_err());
    }

    #[rstest]
    fn rejects_invalid_mailboxes() {
        let result = SmtpNotifier::new(
            "smtp.example.com",
            None,
            "u",
            "p",
            "not-an-address",
            "hello@example.com",
        );
        assert!(result.is_err());
    }
}
