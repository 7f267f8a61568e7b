//! Outbound blob storage adapters.

mod fs_upload_store;

pub use fs_upload_store::{FsUploadStore, PUBLIC_PREFIX};
