//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification covering every HTTP
//! endpoint and the schemas they exchange. Swagger UI serves it in debug
//! builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer-header security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "AuthToken",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "x-auth-token",
                "Stateless admin token issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the portfolio REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Portfolio backend API",
        description = "Public portfolio content plus the token-authenticated admin surface."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("AuthToken" = [])),
    paths(
        crate::inbound::http::profile::login,
        crate::inbound::http::profile::get_public_profile,
        crate::inbound::http::profile::get_own_profile,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::profile::update_credentials,
        crate::inbound::http::profile::upload_profile_image,
        crate::inbound::http::profile::upload_resume,
        crate::inbound::http::skills::list_skills,
        crate::inbound::http::skills::list_public_skills,
        crate::inbound::http::skills::add_skill,
        crate::inbound::http::skills::update_skill,
        crate::inbound::http::skills::delete_skill,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::add_project,
        crate::inbound::http::projects::upload_project_image,
        crate::inbound::http::projects::update_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::contacts::submit_contact,
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::update_contact_status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::PublicProfile,
        crate::domain::SocialLinks,
        crate::domain::EducationEntry,
        crate::domain::ProfileId,
        crate::domain::Username,
        crate::domain::Skill,
        crate::domain::SkillLevel,
        crate::domain::Project,
        crate::domain::TagsInput,
        crate::domain::ContactMessage,
        crate::domain::MessageStatus,
        crate::inbound::http::profile::LoginRequest,
        crate::inbound::http::profile::LoginResponse,
        crate::inbound::http::profile::ProfilePatchRequest,
        crate::inbound::http::profile::CredentialsRequest,
        crate::inbound::http::profile::ImageUploadResponse,
        crate::inbound::http::profile::ResumeUploadResponse,
        crate::inbound::http::skills::NewSkillRequest,
        crate::inbound::http::skills::UpdateSkillRequest,
        crate::inbound::http::projects::NewProjectRequest,
        crate::inbound::http::projects::UpdateProjectRequest,
        crate::inbound::http::contacts::ContactRequest,
        crate::inbound::http::contacts::StatusRequest,
    ))
)]
pub struct ApiDoc;
