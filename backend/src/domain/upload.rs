//! Upload policy: what may be stored for each semantic file field and how
//! stored blobs are named.
//!
//! Filenames are derived from a timestamp plus a random component; the
//! caller-supplied name contributes nothing but its extension, which rules
//! out path traversal and collisions by construction.

use std::fmt;

use serde::Deserialize;

/// Semantic field an upload is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadKind {
    ProfileImage,
    Resume,
    ProjectImage,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
const IMAGE_MIMES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];
const RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];
const RESUME_MIMES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

impl UploadKind {
    /// Prefix baked into generated filenames.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::ProfileImage => "profile",
            Self::Resume => "resume",
            Self::ProjectImage => "project",
        }
    }

    /// Subdirectory of the uploads root this kind is stored under. Also the
    /// path segment in served URLs.
    pub fn subdir(self) -> &'static str {
        match self {
            Self::ProfileImage => "profile",
            Self::Resume => "resumes",
            Self::ProjectImage => "projects",
        }
    }

    /// Accepted lowercase file extensions.
    pub fn accepted_extensions(self) -> &'static [&'static str] {
        match self {
            Self::ProfileImage | Self::ProjectImage => IMAGE_EXTENSIONS,
            Self::Resume => RESUME_EXTENSIONS,
        }
    }

    /// Accepted declared MIME types.
    pub fn accepted_mimes(self) -> &'static [&'static str] {
        match self {
            Self::ProfileImage | Self::ProjectImage => IMAGE_MIMES,
            Self::Resume => RESUME_MIMES,
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Size limits applied per upload kind, in bytes.
///
/// One consistent resume limit (10 MiB) replaces the divergent per-route
/// values of the original system; both limits live in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UploadLimits {
    pub image_max_bytes: u64,
    pub resume_max_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            image_max_bytes: 5 * 1024 * 1024,
            resume_max_bytes: 10 * 1024 * 1024,
        }
    }
}

impl UploadLimits {
    /// Limit applying to the given kind.
    pub fn for_kind(&self, kind: UploadKind) -> u64 {
        match kind {
            UploadKind::ProfileImage | UploadKind::ProjectImage => self.image_max_bytes,
            UploadKind::Resume => self.resume_max_bytes,
        }
    }
}

/// Reasons an upload fails policy validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadPolicyViolation {
    /// File extension not in the accepted set for this kind.
    #[error("extension {extension:?} is not accepted for this field")]
    UnsupportedExtension { extension: String },
    /// Declared MIME type not in the accepted set for this kind.
    #[error("content type {mime:?} is not accepted for this field")]
    UnsupportedMime { mime: String },
    /// File exceeds the configured size limit.
    #[error("file of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
}

/// Lowercased extension of a client-supplied filename, if it has one.
pub fn extension_of(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Validate an upload against the policy for `kind`.
///
/// Extension and MIME are checked before size: a `.exe` is rejected as
/// unsupported no matter what MIME the client declares and no matter how
/// small it is.
pub fn validate_upload(
    kind: UploadKind,
    filename: &str,
    declared_mime: &str,
    size: u64,
    limits: &UploadLimits,
) -> Result<(), UploadPolicyViolation> {
    let extension = extension_of(filename).unwrap_or_default();
    if !kind.accepted_extensions().contains(&extension.as_str()) {
        return Err(UploadPolicyViolation::UnsupportedExtension { extension });
    }
    if !kind.accepted_mimes().contains(&declared_mime) {
        return Err(UploadPolicyViolation::UnsupportedMime {
            mime: declared_mime.to_owned(),
        });
    }
    let limit = limits.for_kind(kind);
    if size > limit {
        return Err(UploadPolicyViolation::TooLarge { size, limit });
    }
    Ok(())
}

/// Build the stored filename for an accepted upload.
///
/// The caller supplies the timestamp and entropy so the derivation itself
/// stays deterministic and testable.
pub fn stored_filename(kind: UploadKind, extension: &str, unix_millis: i64, entropy: u64) -> String {
    format!("{}-{unix_millis}-{entropy:08x}.{extension}", kind.prefix())
}

/// A persisted blob as reported by the upload store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Generated filename within the kind's subdirectory.
    pub filename: String,
    /// Stable URL the blob is served from, e.g.
    /// `http://localhost:8080/uploads/projects/project-...png`.
    pub url: String,
}
