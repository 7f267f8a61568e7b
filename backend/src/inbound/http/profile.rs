//! Profile and login API handlers.
//!
//! ```text
//! POST  /api/auth/login                {"username":"admin","password":"…"}
//! GET   /api/profile/public
//! GET   /api/profile/me                (gate)
//! PATCH /api/profile                   (gate)
//! PATCH /api/profile/credentials       (gate)
//! POST  /api/profile/upload-image      (gate, multipart "profileImage")
//! POST  /api/profile/upload-resume     (gate, multipart "resume")
//! ```

use actix_multipart::Multipart;
use actix_web::{get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::profile_service::CredentialsChange;
use crate::domain::{
    EducationEntry, Error, LoginCredentials, LoginValidationError, ProfilePatch, PublicProfile,
    SocialLinks, UploadKind,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::double_option;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::uploads::read_single_file;

/// Login request body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login payload: the stateless token plus the sanitized
/// profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicProfile,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password" })),
    }
}

/// Authenticate the site owner and issue a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["auth"],
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginRequest { username, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&username, &password)
        .map_err(map_login_validation_error)?;
    let outcome = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        token: outcome.token,
        user: outcome.profile,
    }))
}

/// Sanitized profile for anonymous callers.
#[utoipa::path(
    get,
    path = "/api/profile/public",
    responses(
        (status = 200, description = "Public profile", body = PublicProfile),
        (status = 404, description = "Profile not bootstrapped", body = Error)
    ),
    tags = ["profile"],
    security([])
)]
#[get("/profile/public")]
pub async fn get_public_profile(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<PublicProfile>> {
    Ok(web::Json(state.profile_query.public_profile().await?))
}

/// Sanitized profile for the authenticated owner.
#[utoipa::path(
    get,
    path = "/api/profile/me",
    responses(
        (status = 200, description = "Own profile", body = PublicProfile),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["profile"]
)]
#[get("/profile/me")]
pub async fn get_own_profile(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
) -> ApiResult<web::Json<PublicProfile>> {
    Ok(web::Json(
        state.profile_query.own_profile(caller.profile_id).await?,
    ))
}

/// Partial profile update. Absent fields keep their stored values;
/// `resumeUrl: null` clears the stored URL.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePatchRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub social: Option<SocialLinks>,
    pub skills: Option<Vec<String>>,
    pub education: Option<Vec<EducationEntry>>,
    #[serde(deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub resume_url: Option<Option<String>>,
}

impl From<ProfilePatchRequest> for ProfilePatch {
    fn from(value: ProfilePatchRequest) -> Self {
        let ProfilePatchRequest {
            name,
            email,
            role,
            location,
            social,
            skills,
            education,
            resume_url,
        } = value;
        Self {
            name,
            email,
            role,
            location,
            social,
            skills,
            education,
            resume_url,
        }
    }
}

/// Merge bio fields into the stored profile.
#[utoipa::path(
    patch,
    path = "/api/profile",
    request_body = ProfilePatchRequest,
    responses(
        (status = 200, description = "Updated profile", body = PublicProfile),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["profile"]
)]
#[patch("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: web::Json<ProfilePatchRequest>,
) -> ApiResult<web::Json<PublicProfile>> {
    let patch = ProfilePatch::from(payload.into_inner());
    Ok(web::Json(
        state
            .profile_command
            .update_profile(caller.profile_id, patch)
            .await?,
    ))
}

/// Credential change request. A new password requires the current one.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

impl From<CredentialsRequest> for CredentialsChange {
    fn from(value: CredentialsRequest) -> Self {
        let CredentialsRequest {
            username,
            current_password,
            new_password,
        } = value;
        Self {
            username,
            current_password: current_password.map(Zeroizing::new),
            new_password: new_password.map(Zeroizing::new),
        }
    }
}

/// Change username and/or password.
#[utoipa::path(
    patch,
    path = "/api/profile/credentials",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Updated profile", body = PublicProfile),
        (status = 400, description = "Wrong current password", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 409, description = "Username already taken", body = Error)
    ),
    tags = ["profile"]
)]
#[patch("/profile/credentials")]
pub async fn update_credentials(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<PublicProfile>> {
    let change = CredentialsChange::from(payload.into_inner());
    Ok(web::Json(
        state
            .profile_command
            .update_credentials(caller.profile_id, change)
            .await?,
    ))
}

/// Upload response carrying the served URL of the stored image.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    pub image_url: String,
}

/// Upload response carrying the served URL of the stored resume.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeUploadResponse {
    pub resume_url: String,
}

/// Store a new profile picture and patch its URL onto the profile.
#[utoipa::path(
    post,
    path = "/api/profile/upload-image",
    responses(
        (status = 200, description = "Stored image URL", body = ImageUploadResponse),
        (status = 400, description = "No file uploaded", body = Error),
        (status = 413, description = "File too large", body = Error),
        (status = 415, description = "Unsupported file type", body = Error)
    ),
    tags = ["profile"]
)]
#[post("/profile/upload-image")]
pub async fn upload_profile_image(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: Multipart,
) -> ApiResult<web::Json<ImageUploadResponse>> {
    let kind = UploadKind::ProfileImage;
    let file = read_single_file(payload, "profileImage", state.upload_limits.for_kind(kind)).await?;
    let stored = state
        .uploads
        .accept(kind, &file.filename, &file.mime, file.bytes)
        .await?;
    state
        .profile_command
        .attach_upload(caller.profile_id, kind, stored.clone())
        .await?;
    Ok(web::Json(ImageUploadResponse {
        image_url: stored.url,
    }))
}

/// Store a new resume and patch its URL onto the profile.
#[utoipa::path(
    post,
    path = "/api/profile/upload-resume",
    responses(
        (status = 200, description = "Stored resume URL", body = ResumeUploadResponse),
        (status = 400, description = "No file uploaded", body = Error),
        (status = 413, description = "File too large", body = Error),
        (status = 415, description = "Unsupported file type", body = Error)
    ),
    tags = ["profile"]
)]
#[post("/profile/upload-resume")]
pub async fn upload_resume(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: Multipart,
) -> ApiResult<web::Json<ResumeUploadResponse>> {
    let kind = UploadKind::Resume;
    let file = read_single_file(payload, "resume", state.upload_limits.for_kind(kind)).await?;
    let stored = state
        .uploads
        .accept(kind, &file.filename, &file.mime, file.bytes)
        .await?;
    state
        .profile_command
        .attach_upload(caller.profile_id, kind, stored.clone())
        .await?;
    Ok(web::Json(ResumeUploadResponse {
        resume_url: stored.url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use chrono::Utc;
    use std::sync::Arc;

    use crate::domain::ports::{
        MockLoginService, MockProfileCommand, MockProfileQuery, MockUploadService,
    };
    use crate::domain::{LoginOutcome, ProfileId, StoredUpload, Username};
    use crate::inbound::http::auth::AUTH_TOKEN_HEADER;
    use crate::inbound::http::test_state::{accepting_authenticator, fixture_state};
    use crate::inbound::http::uploads::test_multipart;

    fn fixture_public_profile(id: ProfileId) -> PublicProfile {
        PublicProfile {
            id,
            username: Username::new("admin").expect("valid username"),
            name: "Admin User".to_owned(),
            email: "admin@example.com".to_owned(),
            role: "Software Developer".to_owned(),
            location: "San Francisco, California".to_owned(),
            social: SocialLinks::default(),
            skills: Vec::new(),
            education: Vec::new(),
            resume_url: None,
            profile_picture: None,
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
                .service(login)
                .service(get_public_profile)
                .service(get_own_profile)
                .service(update_profile)
                .service(update_credentials)
                .service(upload_profile_image)
                .service(upload_resume),
        )
    }

    #[actix_web::test]
    async fn login_rejects_blank_username_with_details() {
        let app = test::init_service(test_app(fixture_state())).await;
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&LoginRequest {
                username: "   ".to_owned(),
                password: "pw".to_owned(),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "username");
    }

    #[actix_web::test]
    async fn login_passes_wrong_credentials_through_as_401() {
        let mut login_service = MockLoginService::new();
        login_service
            .expect_login()
            .times(1)
            .return_once(|_| Err(Error::unauthorized("invalid credentials")));
        let state = HttpState {
            login: Arc::new(login_service),
            ..fixture_state()
        };

        let app = test::init_service(test_app(state)).await;
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&LoginRequest {
                username: "admin".to_owned(),
                password: "wrong".to_owned(),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert!(body.get("token").is_none());
    }

    #[actix_web::test]
    async fn login_returns_token_and_sanitized_user() {
        let id = ProfileId::random();
        let mut login_service = MockLoginService::new();
        login_service.expect_login().times(1).return_once(move |_| {
            Ok(LoginOutcome {
                token: "issued-token".to_owned(),
                profile: fixture_public_profile(id),
            })
        });
        let state = HttpState {
            login: Arc::new(login_service),
            ..fixture_state()
        };

        let app = test::init_service(test_app(state)).await;
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&LoginRequest {
                username: "admin".to_owned(),
                password: "admin123".to_owned(),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["token"], "issued-token");
        assert_eq!(body["user"]["username"], "admin");
        assert!(body["user"].get("passwordHash").is_none());
    }

    #[actix_web::test]
    async fn own_profile_requires_the_gate() {
        let app = test::init_service(test_app(fixture_state())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/profile/me").to_request(),
        )
        .await;
        assert_eq!(res.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn public_profile_is_served_without_a_token() {
        let id = ProfileId::random();
        let mut query = MockProfileQuery::new();
        query
            .expect_public_profile()
            .times(1)
            .return_once(move || Ok(fixture_public_profile(id)));
        let state = HttpState {
            profile_query: Arc::new(query),
            ..fixture_state()
        };

        let app = test::init_service(test_app(state)).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/profile/public")
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
    }

    #[actix_web::test]
    async fn patch_forwards_explicit_null_as_clear() {
        let id = ProfileId::random();
        let mut command = MockProfileCommand::new();
        command
            .expect_update_profile()
            .times(1)
            .withf(|_, patch| patch.resume_url == Some(None) && patch.name.is_none())
            .return_once(move |_, _| Ok(fixture_public_profile(id)));
        let state = HttpState {
            authenticator: accepting_authenticator(id),
            profile_command: Arc::new(command),
            ..fixture_state()
        };

        let app = test::init_service(test_app(state)).await;
        let req = test::TestRequest::patch()
            .uri("/api/profile")
            .insert_header((AUTH_TOKEN_HEADER, "token"))
            .set_json(serde_json::json!({ "resumeUrl": null }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
    }

    #[actix_web::test]
    async fn credentials_conflict_surfaces_as_409() {
        let id = ProfileId::random();
        let mut command = MockProfileCommand::new();
        command
            .expect_update_credentials()
            .times(1)
            .return_once(|_, _| Err(Error::conflict("username \"taken\" is already taken")));
        let state = HttpState {
            authenticator: accepting_authenticator(id),
            profile_command: Arc::new(command),
            ..fixture_state()
        };

        let app = test::init_service(test_app(state)).await;
        let req = test::TestRequest::patch()
            .uri("/api/profile/credentials")
            .insert_header((AUTH_TOKEN_HEADER, "token"))
            .set_json(serde_json::json!({ "username": "taken" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn profile_image_upload_stores_and_attaches() {
        let id = ProfileId::random();
        let mut upload_service = MockUploadService::new();
        upload_service
            .expect_accept()
            .times(1)
            .withf(|kind, filename, mime, bytes| {
                *kind == UploadKind::ProfileImage
                    && filename == "me.png"
                    && mime == "image/png"
                    && bytes.as_slice() == [1, 2, 3]
            })
            .return_once(|_, _, _, _| {
                Ok(StoredUpload {
                    filename: "profile-1-aa.png".to_owned(),
                    url: "http://localhost:8080/uploads/profile/profile-1-aa.png".to_owned(),
                })
            });
        let mut command = MockProfileCommand::new();
        command
            .expect_attach_upload()
            .times(1)
            .return_once(move |_, _, _| Ok(fixture_public_profile(id)));
        let state = HttpState {
            authenticator: accepting_authenticator(id),
            uploads: Arc::new(upload_service),
            profile_command: Arc::new(command),
            ..fixture_state()
        };

        let app = test::init_service(test_app(state)).await;
        let boundary = "test-boundary";
        let body =
            test_multipart::file_body(boundary, "profileImage", "me.png", "image/png", &[1, 2, 3]);
        let req = test::TestRequest::post()
            .uri("/api/profile/upload-image")
            .insert_header((AUTH_TOKEN_HEADER, "token"))
            .insert_header(("content-type", test_multipart::content_type(boundary)))
            .set_payload(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
        let body: serde_json::Value = test::read_body_json(res).await;
        assert!(
            body["imageUrl"]
                .as_str()
                .expect("url")
                .ends_with("profile-1-aa.png")
        );
    }

    #[actix_web::test]
    async fn resume_upload_with_exe_extension_is_415() {
        let id = ProfileId::random();
        let mut upload_service = MockUploadService::new();
        upload_service
            .expect_accept()
            .times(1)
            .return_once(|_, _, _, _| {
                Err(Error::unsupported_media_type(
                    "extension \"exe\" is not accepted for this field",
                ))
            });
        let state = HttpState {
            authenticator: accepting_authenticator(id),
            uploads: Arc::new(upload_service),
            ..fixture_state()
        };

        let app = test::init_service(test_app(state)).await;
        let boundary = "test-boundary";
        let body = test_multipart::file_body(
            boundary,
            "resume",
            "cv.exe",
            "application/pdf",
            &[0x4d, 0x5a],
        );
        let req = test::TestRequest::post()
            .uri("/api/profile/upload-resume")
            .insert_header((AUTH_TOKEN_HEADER, "token"))
            .insert_header(("content-type", test_multipart::content_type(boundary)))
            .set_payload(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(
            res.status(),
            actix_web::http::StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }

    #[actix_web::test]
    async fn upload_without_a_file_part_is_400() {
        let id = ProfileId::random();
        let state = HttpState {
            authenticator: accepting_authenticator(id),
            ..fixture_state()
        };

        let app = test::init_service(test_app(state)).await;
        let boundary = "test-boundary";
        // A multipart body whose only field has the wrong name.
        let body =
            test_multipart::file_body(boundary, "unrelated", "me.png", "image/png", &[1, 2, 3]);
        let req = test::TestRequest::post()
            .uri("/api/profile/upload-image")
            .insert_header((AUTH_TOKEN_HEADER, "token"))
            .insert_header(("content-type", test_multipart::content_type(boundary)))
            .set_payload(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
