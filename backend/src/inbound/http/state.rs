//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend
//! only on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::UploadLimits;
use crate::domain::ports::{
    ContactsCommand, ContactsQuery, LoginService, ProfileCommand, ProfileQuery, ProjectsCommand,
    ProjectsQuery, SkillsCommand, SkillsQuery, TokenAuthenticator, UploadService,
};

/// Dependency bundle for HTTP handlers: one `Arc<dyn Port>` per use-case
/// group, plus the upload limits the multipart reader caps streams at.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub authenticator: Arc<dyn TokenAuthenticator>,
    pub profile_query: Arc<dyn ProfileQuery>,
    pub profile_command: Arc<dyn ProfileCommand>,
    pub skills_query: Arc<dyn SkillsQuery>,
    pub skills_command: Arc<dyn SkillsCommand>,
    pub projects_query: Arc<dyn ProjectsQuery>,
    pub projects_command: Arc<dyn ProjectsCommand>,
    pub contacts_query: Arc<dyn ContactsQuery>,
    pub contacts_command: Arc<dyn ContactsCommand>,
    pub uploads: Arc<dyn UploadService>,
    pub upload_limits: UploadLimits,
}
