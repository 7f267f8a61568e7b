//! Filesystem blob store for uploads, scoped with cap-std.
//!
//! The store holds a capability to the uploads root directory; every write
//! resolves relative to that `Dir`, so a crafted filename cannot escape it
//! even if filename generation ever regressed.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use chrono::Utc;
use tracing::debug;

use crate::domain::ports::{UploadStore, UploadStoreError};
use crate::domain::{StoredUpload, UploadKind, stored_filename};

/// Path prefix uploaded blobs are served under.
pub const PUBLIC_PREFIX: &str = "uploads";

/// cap-std backed implementation of the [`UploadStore`] port.
#[derive(Clone)]
pub struct FsUploadStore {
    root: Arc<Dir>,
    base_url: String,
}

impl FsUploadStore {
    /// Open (creating if needed) the uploads root and capture a capability
    /// to it. `base_url` is the externally visible origin, e.g.
    /// `http://localhost:8080`.
    pub fn open(root_path: &Path, base_url: &url::Url) -> Result<Self, UploadStoreError> {
        std::fs::create_dir_all(root_path)
            .map_err(|err| UploadStoreError::io(format!("create uploads root: {err}")))?;
        let root = Dir::open_ambient_dir(root_path, ambient_authority())
            .map_err(|err| UploadStoreError::io(format!("open uploads root: {err}")))?;
        Ok(Self {
            root: Arc::new(root),
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait]
impl UploadStore for FsUploadStore {
    async fn store(
        &self,
        kind: UploadKind,
        extension: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredUpload, UploadStoreError> {
        let filename = stored_filename(
            kind,
            extension,
            Utc::now().timestamp_millis(),
            u64::from(rand::random::<u32>()),
        );
        let relative = format!("{}/{}", kind.subdir(), filename);

        let root = Arc::clone(&self.root);
        let write_path = relative.clone();
        let subdir = kind.subdir();
        tokio::task::spawn_blocking(move || {
            root.create_dir_all(subdir)
                .map_err(|err| UploadStoreError::io(format!("create {subdir}: {err}")))?;
            root.write(&write_path, &bytes)
                .map_err(|err| UploadStoreError::io(format!("write {write_path}: {err}")))
        })
        .await
        .map_err(|err| UploadStoreError::io(format!("blocking write task failed: {err}")))??;

        debug!(%relative, "upload stored");
        Ok(StoredUpload {
            url: format!("{}/{PUBLIC_PREFIX}/{relative}", self.base_url),
            filename,
        })
    }
}
