//! Domain entities, ports, and services.
//!
//! Types here are transport and storage agnostic: inbound adapters map
//! HTTP payloads into them, outbound adapters persist them. Invariants and
//! serialisation contracts are documented on each type.

pub mod auth;
pub mod contact;
pub mod contact_service;
pub mod error;
pub mod ports;
pub mod profile;
pub mod profile_service;
pub mod project;
pub mod project_service;
pub mod skill;
pub mod skill_service;
pub mod upload;
pub mod upload_service;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::contact::{
    ContactMessage, ContactSubmission, InvalidStatus, MessageStatus, SubmissionValidationError,
};
pub use self::contact_service::ContactService;
pub use self::error::{Error, ErrorCode};
pub use self::profile::{
    EducationEntry, Profile, ProfileId, ProfilePatch, PublicProfile, SocialLinks, Username,
    UsernameValidationError,
};
pub use self::profile_service::{BootstrapAdmin, CredentialsChange, LoginOutcome, ProfileService};
pub use self::project::{Project, ProjectDraft, ProjectPatch, TagsInput, normalize_tags};
pub use self::project_service::ProjectService;
pub use self::skill::{DEFAULT_SKILL_LEVEL, Skill, SkillLevel, SkillPatch};
pub use self::skill_service::SkillService;
pub use self::upload::{
    StoredUpload, UploadKind, UploadLimits, UploadPolicyViolation, extension_of, stored_filename,
    validate_upload,
};
pub use self::upload_service::UploadServiceImpl;

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
