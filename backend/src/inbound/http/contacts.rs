//! Contact-message API handlers.
//!
//! ```text
//! POST  /api/contacts        (public submission)
//! GET   /api/contacts        (gate)
//! PATCH /api/contacts/{id}   (gate, status triage)
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{ContactMessage, ContactSubmission, Error, MessageStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::state::HttpState;

/// Public contact form payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Status triage payload. Values outside the enum are rejected with 400.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    pub status: String,
}

/// Accept an anonymous contact submission.
#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message stored"),
        (status = 400, description = "Missing fields", body = Error)
    ),
    tags = ["contacts"],
    security([])
)]
#[post("/contacts")]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let ContactRequest {
        name,
        email,
        subject,
        message,
    } = payload.into_inner();
    let submission = ContactSubmission::try_from_parts(&name, &email, &subject, &message)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    state.contacts_command.submit(submission).await?;
    Ok(HttpResponse::Created().json(json!({ "message": "Message sent successfully!" })))
}

/// Every message, newest first.
#[utoipa::path(
    get,
    path = "/api/contacts",
    responses(
        (status = 200, description = "Inbox", body = [ContactMessage]),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["contacts"]
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    _caller: AuthenticatedCaller,
) -> ApiResult<web::Json<Vec<ContactMessage>>> {
    Ok(web::Json(state.contacts_query.list().await?))
}

/// Overwrite the triage status of a message.
#[utoipa::path(
    patch,
    path = "/api/contacts/{id}",
    request_body = StatusRequest,
    params(("id" = String, Path, description = "Message id")),
    responses(
        (status = 200, description = "Updated message", body = ContactMessage),
        (status = 400, description = "Invalid status", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Message not found", body = Error)
    ),
    tags = ["contacts"]
)]
#[patch("/contacts/{id}")]
pub async fn update_contact_status(
    state: web::Data<HttpState>,
    _caller: AuthenticatedCaller,
    id: web::Path<Uuid>,
    payload: web::Json<StatusRequest>,
) -> ApiResult<web::Json<ContactMessage>> {
    let status = payload
        .status
        .parse::<MessageStatus>()
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    Ok(web::Json(
        state
            .contacts_command
            .update_status(id.into_inner(), status)
            .await?,
    ))
}
