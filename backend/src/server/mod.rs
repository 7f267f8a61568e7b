//! Server construction and route wiring.

mod config;

pub use config::ServerConfig;

use std::path::PathBuf;

use actix_files::Files;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::contacts::{list_contacts, submit_contact, update_contact_status};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::profile::{
    get_own_profile, get_public_profile, login, update_credentials, update_profile,
    upload_profile_image, upload_resume,
};
use backend::inbound::http::projects::{
    add_project, delete_project, list_projects, update_project, upload_project_image,
};
use backend::inbound::http::skills::{
    add_skill, delete_skill, list_public_skills, list_skills, update_skill,
};
use backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    uploads_dir: PathBuf,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
> {
    let AppDependencies {
        health_state,
        http_state,
        uploads_dir,
    } = deps;

    let api = web::scope("/api")
        .service(login)
        .service(get_public_profile)
        .service(get_own_profile)
        .service(update_profile)
        .service(update_credentials)
        .service(upload_profile_image)
        .service(upload_resume)
        .service(list_public_skills)
        .service(list_skills)
        .service(add_skill)
        .service(update_skill)
        .service(delete_skill)
        .service(list_projects)
        .service(upload_project_image)
        .service(add_project)
        .service(update_project)
        .service(delete_project)
        .service(submit_contact)
        .service(list_contacts)
        .service(update_contact_status);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        // Uploaded blobs are served back as static content.
        .service(Files::new("/uploads", uploads_dir))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the Actix HTTP server.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let ServerConfig {
        bind_addr,
        uploads_dir,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let prometheus = match prometheus {
        Some(metrics) => metrics,
        None => make_metrics()?,
    };

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            uploads_dir: uploads_dir.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<actix_web_prom::PrometheusMetrics> {
    actix_web_prom::PrometheusMetricsBuilder::new("portfolio")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("configure Prometheus metrics: {err}")))
}
