//! Driving port for validated uploads.

use async_trait::async_trait;

use crate::domain::{Error, StoredUpload, UploadKind};

/// Domain use-case port for accepting a single uploaded file.
///
/// Validation order is fixed: extension, declared MIME, size. Policy
/// violations map to `UnsupportedMediaType` / `PayloadTooLarge`; store
/// failures to `ServiceUnavailable`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploadService: Send + Sync {
    /// Validate `bytes` against the policy for `kind` and persist them.
    async fn accept(
        &self,
        kind: UploadKind,
        client_filename: &str,
        declared_mime: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredUpload, Error>;
}
