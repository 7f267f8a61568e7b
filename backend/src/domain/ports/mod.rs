//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hasher, tokens, notifier, blob store) are
//! implemented by `outbound` adapters; driving ports (queries, commands,
//! login, upload) are implemented by the domain services and consumed by
//! the HTTP layer through `Arc<dyn …>`.

mod auth;
mod contact_notifier;
mod contact_ops;
mod contact_repository;
mod password_hasher;
mod profile_ops;
mod profile_repository;
mod project_ops;
mod project_repository;
mod skill_ops;
mod skill_repository;
mod token_service;
mod upload_ops;
mod upload_store;

#[cfg(test)]
pub use auth::{MockLoginService, MockTokenAuthenticator};
pub use auth::{LoginService, TokenAuthenticator};
#[cfg(test)]
pub use contact_notifier::MockContactNotifier;
pub use contact_notifier::{ContactNotifier, DisabledContactNotifier, NotifierError};
#[cfg(test)]
pub use contact_ops::{MockContactsCommand, MockContactsQuery};
pub use contact_ops::{ContactsCommand, ContactsQuery};
#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{
    ContactRepository, ContactRepositoryError, FixtureContactRepository,
};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use profile_ops::{MockProfileCommand, MockProfileQuery};
pub use profile_ops::{ProfileCommand, ProfileQuery};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{
    FixtureProfileRepository, ProfileRepository, ProfileRepositoryError,
};
#[cfg(test)]
pub use project_ops::{MockProjectsCommand, MockProjectsQuery};
pub use project_ops::{ProjectsCommand, ProjectsQuery};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{
    FixtureProjectRepository, ProjectRepository, ProjectRepositoryError,
};
#[cfg(test)]
pub use skill_ops::{MockSkillsCommand, MockSkillsQuery};
pub use skill_ops::{SkillsCommand, SkillsQuery};
#[cfg(test)]
pub use skill_repository::MockSkillRepository;
pub use skill_repository::{FixtureSkillRepository, SkillRepository, SkillRepositoryError};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{FixtureTokenService, TokenService, TokenServiceError};
#[cfg(test)]
pub use upload_ops::MockUploadService;
pub use upload_ops::UploadService;
#[cfg(test)]
pub use upload_store::MockUploadStore;
pub use upload_store::{UploadStore, UploadStoreError};
