//! Project API handlers.
//!
//! ```text
//! GET    /api/projects
//! POST   /api/projects               (gate)
//! POST   /api/projects/upload-image  (gate, multipart "image")
//! PUT    /api/projects/{id}          (gate)
//! DELETE /api/projects/{id}          (gate)
//! ```

use actix_multipart::Multipart;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Project, ProjectDraft, ProjectPatch, TagsInput, UploadKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::double_option;
use crate::inbound::http::profile::ImageUploadResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::uploads::read_single_file;

/// Body for creating a project. `tags` accepts both a comma-separated
/// string and an array; both are normalized before storage.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectRequest {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub tags: Option<TagsInput>,
    #[serde(default)]
    pub live_link: Option<String>,
    #[serde(default)]
    pub code_link: Option<String>,
}

/// Body for updating a project; absent fields keep their stored values,
/// `null` clears the nullable links.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub tags: Option<TagsInput>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, nullable)]
    pub live_link: Option<Option<String>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, nullable)]
    pub code_link: Option<Option<String>>,
}

impl From<UpdateProjectRequest> for ProjectPatch {
    fn from(value: UpdateProjectRequest) -> Self {
        let UpdateProjectRequest {
            title,
            description,
            image,
            tags,
            live_link,
            code_link,
        } = value;
        Self {
            title,
            description,
            image,
            tags,
            live_link,
            code_link,
        }
    }
}

/// Every project, newest first.
#[utoipa::path(
    get,
    path = "/api/projects",
    responses((status = 200, description = "Projects", body = [Project])),
    tags = ["projects"],
    security([])
)]
#[get("/projects")]
pub async fn list_projects(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Project>>> {
    Ok(web::Json(state.projects_query.list().await?))
}

/// Create a project.
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = NewProjectRequest,
    responses(
        (status = 201, description = "Created project", body = Project),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["projects"]
)]
#[post("/projects")]
pub async fn add_project(
    state: web::Data<HttpState>,
    _caller: AuthenticatedCaller,
    payload: web::Json<NewProjectRequest>,
) -> ApiResult<HttpResponse> {
    let NewProjectRequest {
        title,
        description,
        image,
        tags,
        live_link,
        code_link,
    } = payload.into_inner();
    let draft = ProjectDraft::new(
        title,
        description,
        image,
        tags.unwrap_or_else(|| TagsInput::Split(Vec::new())),
        live_link,
        code_link,
    );
    let project = state.projects_command.add(draft).await?;
    Ok(HttpResponse::Created().json(project))
}

/// Store a project cover image and return its served URL.
#[utoipa::path(
    post,
    path = "/api/projects/upload-image",
    responses(
        (status = 200, description = "Stored image URL", body = ImageUploadResponse),
        (status = 400, description = "No file uploaded", body = Error),
        (status = 413, description = "File too large", body = Error),
        (status = 415, description = "Unsupported file type", body = Error)
    ),
    tags = ["projects"]
)]
#[post("/projects/upload-image")]
pub async fn upload_project_image(
    state: web::Data<HttpState>,
    _caller: AuthenticatedCaller,
    payload: Multipart,
) -> ApiResult<web::Json<ImageUploadResponse>> {
    let kind = UploadKind::ProjectImage;
    let file = read_single_file(payload, "image", state.upload_limits.for_kind(kind)).await?;
    let stored = state
        .uploads
        .accept(kind, &file.filename, &file.mime, file.bytes)
        .await?;
    Ok(web::Json(ImageUploadResponse {
        image_url: stored.url,
    }))
}

/// Update a project.
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    request_body = UpdateProjectRequest,
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Updated project", body = Project),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Project not found", body = Error)
    ),
    tags = ["projects"]
)]
#[put("/projects/{id}")]
pub async fn update_project(
    state: web::Data<HttpState>,
    _caller: AuthenticatedCaller,
    id: web::Path<Uuid>,
    payload: web::Json<UpdateProjectRequest>,
) -> ApiResult<web::Json<Project>> {
    let patch = ProjectPatch::from(payload.into_inner());
    Ok(web::Json(
        state.projects_command.update(id.into_inner(), patch).await?,
    ))
}

/// Remove a project.
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project removed"),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Project not found", body = Error)
    ),
    tags = ["projects"]
)]
#[delete("/projects/{id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    _caller: AuthenticatedCaller,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.projects_command.delete(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Project removed" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use chrono::Utc;
    use std::sync::Arc;

    use crate::domain::ProfileId;
    use crate::domain::ports::{MockProjectsCommand, MockProjectsQuery};
    use crate::inbound::http::auth::AUTH_TOKEN_HEADER;
    use crate::inbound::http::test_state::{accepting_authenticator, fixture_state};

    fn fixture_project(title: &str) -> Project {
        Project {
            id: Uuid::new_v4(),
            title: title.to_owned(),
            description: "desc".to_owned(),
            image: "/uploads/projects/p.png".to_owned(),
            tags: vec!["rust".to_owned()],
            live_link: None,
            code_link: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api")
                .service(list_projects)
                .service(upload_project_image)
                .service(add_project)
                .service(update_project)
                .service(delete_project),
        )
    }

    #[actix_web::test]
    async fn listing_is_public() {
        let mut query = MockProjectsQuery::new();
        query
            .expect_list()
            .times(1)
            .return_once(|| Ok(vec![fixture_project("Newest"), fixture_project("Older")]));
        let state = HttpState {
            projects_query: Arc::new(query),
            ..fixture_state()
        };

        let app = test::init_service(test_app(state)).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/projects").to_request(),
        )
        .await;
        assert!(res.status().is_success());
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body[0]["title"], "Newest");
    }

    #[actix_web::test]
    async fn mutations_require_the_gate() {
        let app = test::init_service(test_app(fixture_state())).await;
        let req = test::TestRequest::post()
            .uri("/api/projects")
            .set_json(serde_json::json!({
                "title": "T", "description": "D", "image": "/i.png"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn add_accepts_comma_separated_tags() {
        let caller = ProfileId::random();
        let mut command = MockProjectsCommand::new();
        command
            .expect_add()
            .times(1)
            .withf(|draft| draft.tags == vec!["a", "b", "c"])
            .return_once(|draft| {
                Ok(Project {
                    id: Uuid::new_v4(),
                    title: draft.title,
                    description: draft.description,
                    image: draft.image,
                    tags: draft.tags,
                    live_link: draft.live_link,
                    code_link: draft.code_link,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });
        let state = HttpState {
            authenticator: accepting_authenticator(caller),
            projects_command: Arc::new(command),
            ..fixture_state()
        };

        let app = test::init_service(test_app(state)).await;
        let req = test::TestRequest::post()
            .uri("/api/projects")
            .insert_header((AUTH_TOKEN_HEADER, "token"))
            .set_json(serde_json::json!({
                "title": "T", "description": "D", "image": "/i.png",
                "tags": "a, b ,c"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["tags"], serde_json::json!(["a", "b", "c"]));
    }

    #[actix_web::test]
    async fn add_accepts_array_tags_unchanged() {
        let caller = ProfileId::random();
        let mut command = MockProjectsCommand::new();
        command
            .expect_add()
            .times(1)
            .withf(|draft| draft.tags == vec!["a", "b"])
            .return_once(|draft| {
                Ok(Project {
                    id: Uuid::new_v4(),
                    title: draft.title,
                    description: draft.description,
                    image: draft.image,
                    tags: draft.tags,
                    live_link: None,
                    code_link: None,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });
        let state = HttpState {
            authenticator: accepting_authenticator(caller),
            projects_command: Arc::new(command),
            ..fixture_state()
        };

        let app = test::init_service(test_app(state)).await;
        let req = test::TestRequest::post()
            .uri("/api/projects")
            .insert_header((AUTH_TOKEN_HEADER, "token"))
            .set_json(serde_json::json!({
                "title": "T", "description": "D", "image": "/i.png",
                "tags": ["a", "b"]
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn update_of_missing_project_is_404() {
        let caller = ProfileId::random();
        let mut command = MockProjectsCommand::new();
        command
            .expect_update()
            .times(1)
            .return_once(|_, _| Err(Error::not_found("project not found")));
        let state = HttpState {
            authenticator: accepting_authenticator(caller),
            projects_command: Arc::new(command),
            ..fixture_state()
        };

        let app = test::init_service(test_app(state)).await;
        let req = test::TestRequest::put()
            .uri(&format!("/api/projects/{}", Uuid::new_v4()))
            .insert_header((AUTH_TOKEN_HEADER, "token"))
            .set_json(&UpdateProjectRequest::default())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_forwards_null_links_as_clear() {
        let caller = ProfileId::random();
        let mut command = MockProjectsCommand::new();
        command
            .expect_update()
            .times(1)
            .withf(|_, patch| patch.live_link == Some(None) && patch.code_link.is_none())
            .return_once(|_, _| Ok(fixture_project("T")));
        let state = HttpState {
            authenticator: accepting_authenticator(caller),
            projects_command: Arc::new(command),
            ..fixture_state()
        };

        let app = test::init_service(test_app(state)).await;
        let req = test::TestRequest::put()
            .uri(&format!("/api/projects/{}", Uuid::new_v4()))
            .insert_header((AUTH_TOKEN_HEADER, "token"))
            .set_json(serde_json::json!({ "liveLink": null }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
    }
}
