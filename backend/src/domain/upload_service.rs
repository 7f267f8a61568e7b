//! Upload use-case: policy validation in front of the blob store.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UploadService, UploadStore, UploadStoreError};
use crate::domain::{
    Error, StoredUpload, UploadKind, UploadLimits, UploadPolicyViolation, extension_of,
    validate_upload,
};

/// Policy-enforcing implementation of the [`UploadService`] port.
#[derive(Clone)]
pub struct UploadServiceImpl<S> {
    store: Arc<S>,
    limits: UploadLimits,
}

impl<S> UploadServiceImpl<S> {
    /// Create a new service over a blob store with the configured limits.
    pub fn new(store: Arc<S>, limits: UploadLimits) -> Self {
        Self { store, limits }
    }
}

fn map_violation(violation: UploadPolicyViolation) -> Error {
    match violation {
        UploadPolicyViolation::UnsupportedExtension { .. }
        | UploadPolicyViolation::UnsupportedMime { .. } => {
            Error::unsupported_media_type(violation.to_string())
        }
        UploadPolicyViolation::TooLarge { .. } => Error::payload_too_large(violation.to_string()),
    }
}

fn map_store_error(error: UploadStoreError) -> Error {
    let UploadStoreError::Io { message } = error;
    Error::service_unavailable(format!("upload store unavailable: {message}"))
}

#[async_trait]
impl<S> UploadService for UploadServiceImpl<S>
where
    S: UploadStore,
{
    async fn accept(
        &self,
        kind: UploadKind,
        client_filename: &str,
        declared_mime: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredUpload, Error> {
        validate_upload(
            kind,
            client_filename,
            declared_mime,
            bytes.len() as u64,
            &self.limits,
        )
        .map_err(map_violation)?;

        // validate_upload only passes filenames with an accepted extension.
        let extension = extension_of(client_filename)
            .ok_or_else(|| Error::internal("validated upload lost its extension"))?;

        self.store
            .store(kind, &extension, bytes)
            .await
            .map_err(map_store_error)
    }
}
