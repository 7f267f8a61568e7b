//! Port for durable blob storage of accepted uploads.

use async_trait::async_trait;

use crate::domain::{StoredUpload, UploadKind};

/// Errors raised by upload store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadStoreError {
    /// Writing the blob to durable storage failed.
    #[error("upload store write failed: {message}")]
    Io { message: String },
}

impl UploadStoreError {
    /// Create an I/O error with the given message.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

/// Port for persisting validated upload bytes.
///
/// Implementations generate the collision-resistant filename themselves;
/// the caller supplies only the (already validated) extension. Stored
/// blobs for the same owner are never garbage-collected; superseded
/// profile pictures and resumes stay on disk.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Write `bytes` under a fresh name for `kind` and report where the
    /// blob is reachable.
    async fn store(
        &self,
        kind: UploadKind,
        extension: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredUpload, UploadStoreError>;
}
