//! Skill API handlers.
//!
//! ```text
//! GET    /api/skills          (gate, own skills)
//! GET    /api/skills/public
//! POST   /api/skills          (gate)
//! PUT    /api/skills/{id}     (gate + ownership)
//! DELETE /api/skills/{id}     (gate + ownership)
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Skill, SkillLevel, SkillPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::state::HttpState;

/// Body for creating a skill. Omitted level defaults to 75.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewSkillRequest {
    pub name: String,
    /// Clamped into [0, 100] when present.
    pub level: Option<i32>,
}

/// Body for updating a skill; absent fields keep their stored values.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSkillRequest {
    pub name: Option<String>,
    pub level: Option<i32>,
}

impl From<UpdateSkillRequest> for SkillPatch {
    fn from(value: UpdateSkillRequest) -> Self {
        Self {
            name: value.name,
            level: value.level.map(SkillLevel::clamped),
        }
    }
}

/// The caller's own skills, name ascending.
#[utoipa::path(
    get,
    path = "/api/skills",
    responses(
        (status = 200, description = "Own skills", body = [Skill]),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["skills"]
)]
#[get("/skills")]
pub async fn list_skills(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
) -> ApiResult<web::Json<Vec<Skill>>> {
    Ok(web::Json(
        state.skills_query.list_own(caller.profile_id).await?,
    ))
}

/// Every skill, for the public site.
#[utoipa::path(
    get,
    path = "/api/skills/public",
    responses((status = 200, description = "All skills", body = [Skill])),
    tags = ["skills"],
    security([])
)]
#[get("/skills/public")]
pub async fn list_public_skills(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Skill>>> {
    Ok(web::Json(state.skills_query.list_public().await?))
}

/// Create a skill owned by the caller.
#[utoipa::path(
    post,
    path = "/api/skills",
    request_body = NewSkillRequest,
    responses(
        (status = 201, description = "Created skill", body = Skill),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["skills"]
)]
#[post("/skills")]
pub async fn add_skill(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: web::Json<NewSkillRequest>,
) -> ApiResult<HttpResponse> {
    let NewSkillRequest { name, level } = payload.into_inner();
    let skill = state
        .skills_command
        .add(caller.profile_id, name, level.map(SkillLevel::clamped))
        .await?;
    Ok(HttpResponse::Created().json(skill))
}

/// Update an owned skill.
#[utoipa::path(
    put,
    path = "/api/skills/{id}",
    request_body = UpdateSkillRequest,
    params(("id" = String, Path, description = "Skill id")),
    responses(
        (status = 200, description = "Updated skill", body = Skill),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Owned by another profile", body = Error),
        (status = 404, description = "Skill not found", body = Error)
    ),
    tags = ["skills"]
)]
#[put("/skills/{id}")]
pub async fn update_skill(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    id: web::Path<Uuid>,
    payload: web::Json<UpdateSkillRequest>,
) -> ApiResult<web::Json<Skill>> {
    let patch = SkillPatch::from(payload.into_inner());
    Ok(web::Json(
        state
            .skills_command
            .update(id.into_inner(), caller.profile_id, patch)
            .await?,
    ))
}

/// Remove an owned skill.
#[utoipa::path(
    delete,
    path = "/api/skills/{id}",
    params(("id" = String, Path, description = "Skill id")),
    responses(
        (status = 200, description = "Skill removed"),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Owned by another profile", body = Error),
        (status = 404, description = "Skill not found", body = Error)
    ),
    tags = ["skills"]
)]
#[delete("/skills/{id}")]
pub async fn delete_skill(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state
        .skills_command
        .delete(id.into_inner(), caller.profile_id)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Skill removed" })))
}
