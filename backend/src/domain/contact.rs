//! Contact-message inbox entries submitted by anonymous visitors.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Triage status of a contact message.
///
/// Any status may be overwritten with any other; only the enum membership
/// is enforced. New submissions always start at [`MessageStatus::New`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    New,
    Responded,
    Completed,
}

/// Error returned when a status string is outside the fixed enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus(pub String);

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid status {:?}; expected one of new, responded, completed",
            self.0
        )
    }
}

impl std::error::Error for InvalidStatus {}

impl MessageStatus {
    /// Stored string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Responded => "responded",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "responded" => Ok(Self::Responded),
            "completed" => Ok(Self::Completed),
            other => Err(InvalidStatus(other.to_owned())),
        }
    }
}

/// A free-standing inbox entry; no foreign key to any other aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[schema(value_type = String, example = "5a8a3ed1-08fb-41dc-b3a2-1ad37c0a8b0a")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: MessageStatus,
    /// True only when the best-effort notification reported success.
    pub notification_sent: bool,
    /// Inbox address the notification was (or would have been) sent to.
    pub notification_email: String,
    pub created_at: DateTime<Utc>,
}

/// Validation errors for a public contact submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionValidationError {
    MissingField(&'static str),
}

impl fmt::Display for SubmissionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} must not be empty"),
        }
    }
}

impl std::error::Error for SubmissionValidationError {}

/// Validated public submission, all fields non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    /// Validate raw submission fields.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> Result<Self, SubmissionValidationError> {
        fn required(
            value: &str,
            field: &'static str,
        ) -> Result<String, SubmissionValidationError> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(SubmissionValidationError::MissingField(field));
            }
            Ok(trimmed.to_owned())
        }

        Ok(Self {
            name: required(name, "name")?,
            email: required(email, "email")?,
            subject: required(subject, "subject")?,
            message: required(message, "message")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("new", Ok(MessageStatus::New))]
    #[case("responded", Ok(MessageStatus::Responded))]
    #[case("completed", Ok(MessageStatus::Completed))]
    #[case("pending", Err(()))]
    #[case("NEW", Err(()))]
    #[case("", Err(()))]
    fn status_parsing(#[case] input: &str, #[case] expected: Result<MessageStatus, ()>) {
        let parsed = input.parse::<MessageStatus>();
        match expected {
            Ok(status) => assert_eq!(parsed.expect("valid status"), status),
            Err(()) => {
                let err = parsed.expect_err("invalid status");
                assert_eq!(err.0, input);
            }
        }
    }

    #[rstest]
    fn status_round_trips_through_display() {
        for status in [
            MessageStatus::New,
            MessageStatus::Responded,
            MessageStatus::Completed,
        ] {
            assert_eq!(status.to_string().parse::<MessageStatus>(), Ok(status));
        }
    }

    #[rstest]
    fn submission_trims_fields() {
        let submission =
            ContactSubmission::try_from_parts(" Ada ", "ada@example.com", "Hi", "Hello there")
                .expect("valid");
        assert_eq!(submission.name, "Ada");
    }

    #[rstest]
    #[case("", "a@b.c", "s", "m", "name")]
    #[case("n", "  ", "s", "m", "email")]
    #[case("n", "a@b.c", "", "m", "subject")]
    #[case("n", "a@b.c", "s", "", "message")]
    fn submission_rejects_blank_fields(
        #[case] name: &str,
        #[case] email: &str,
        #[case] subject: &str,
        #[case] message: &str,
        #[case] field: &str,
    ) {
        let err = ContactSubmission::try_from_parts(name, email, subject, message)
            .expect_err("should reject");
        let SubmissionValidationError::MissingField(which) = err;
        assert_eq!(which, field);
    }
}
