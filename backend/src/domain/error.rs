//! Domain-level error type shared by every service.
//!
//! These errors are transport agnostic. The HTTP adapter maps them to
//! status codes and a consistent JSON envelope; services construct them
//! from port errors and invariant violations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::middleware::trace::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to operate on this resource.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// A uniqueness constraint would be violated.
    Conflict,
    /// An uploaded file's type is not accepted for the target field.
    UnsupportedMediaType,
    /// An uploaded file exceeds the configured size limit.
    PayloadTooLarge,
    /// Persistence or a downstream dependency is unavailable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// Captures the scoped trace identifier at construction time so error
/// responses correlate with request logs without handler involvement.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("no such skill");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "invalid_request")]
    code: ErrorCode,
    #[schema(example = "Something went wrong")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    /// Supplementary structured details, e.g. field-level validation info.
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error, capturing the current trace id if one is in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier attached at construction time, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "name" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::UnsupportedMediaType`].
    pub fn unsupported_media_type(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedMediaType, message)
    }

    /// Convenience constructor for [`ErrorCode::PayloadTooLarge`].
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PayloadTooLarge, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constructors_set_the_expected_code() {
        assert_eq!(Error::invalid_request("m").code(), ErrorCode::InvalidRequest);
        assert_eq!(Error::unauthorized("m").code(), ErrorCode::Unauthorized);
        assert_eq!(Error::forbidden("m").code(), ErrorCode::Forbidden);
        assert_eq!(Error::not_found("m").code(), ErrorCode::NotFound);
        assert_eq!(Error::conflict("m").code(), ErrorCode::Conflict);
        assert_eq!(
            Error::unsupported_media_type("m").code(),
            ErrorCode::UnsupportedMediaType
        );
        assert_eq!(
            Error::payload_too_large("m").code(),
            ErrorCode::PayloadTooLarge
        );
        assert_eq!(
            Error::service_unavailable("m").code(),
            ErrorCode::ServiceUnavailable
        );
        assert_eq!(Error::internal("m").code(), ErrorCode::InternalError);
    }

    #[test]
    fn serialises_codes_as_snake_case() {
        let err = Error::unsupported_media_type("bad file");
        let value = serde_json::to_value(&err).expect("serialise error");
        assert_eq!(value["code"], "unsupported_media_type");
        assert_eq!(value["message"], "bad file");
        assert!(value.get("details").is_none());
    }

    #[test]
    fn details_round_trip() {
        let err = Error::invalid_request("bad").with_details(json!({ "field": "level" }));
        let value = serde_json::to_value(&err).expect("serialise error");
        assert_eq!(value["details"]["field"], "level");
    }

    #[test]
    fn trace_id_is_absent_outside_a_request_scope() {
        let err = Error::internal("boom");
        assert!(err.trace_id().is_none());
    }
}
