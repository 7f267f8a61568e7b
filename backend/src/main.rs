//! Backend entry-point: configuration, adapters, bootstrap, and server
//! startup.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::ports::{ContactNotifier, DisabledContactNotifier};
use backend::domain::{
    BootstrapAdmin, ContactService, ProfileService, ProjectService, SkillService,
    UploadServiceImpl,
};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::auth::{Argon2PasswordHasher, JwtTokenService, secret_fingerprint};
use backend::outbound::notify::SmtpNotifier;
use backend::outbound::persistence::{
    DbPool, DieselContactRepository, DieselProfileRepository, DieselProjectRepository,
    DieselSkillRepository, PoolConfig, run_migrations,
};
use backend::outbound::storage::FsUploadStore;
use backend::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load configuration")?;
    let bind_addr = settings.bind_addr()?;
    let database_url = settings.database_url()?.to_owned();

    {
        let url = database_url.clone();
        tokio::task::spawn_blocking(move || run_migrations(&url))
            .await
            .wrap_err("migration task failed")?
            .wrap_err("database migrations failed")?;
    }

    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .wrap_err("failed to build database pool")?;

    let secret = settings.auth_secret();
    if settings.uses_dev_secret() {
        warn!("PORTFOLIO_AUTH_SECRET is unset; using the development fallback secret");
    }
    info!(
        fingerprint = %secret_fingerprint(&secret),
        "auth token signing key loaded"
    );

    let profile_repo = Arc::new(DieselProfileRepository::new(pool.clone()));
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let tokens = Arc::new(JwtTokenService::new(&secret, settings.token_ttl()));
    let profile_service = Arc::new(ProfileService::new(profile_repo, hasher, tokens));

    profile_service
        .bootstrap(&BootstrapAdmin::new(
            settings.admin_username(),
            settings.admin_password(),
        ))
        .await
        .wrap_err("admin bootstrap failed")?;

    let notifier: Arc<dyn ContactNotifier> = match settings.smtp() {
        Some(smtp) => {
            match SmtpNotifier::new(
                &smtp.host,
                smtp.port,
                &smtp.username,
                smtp.password.as_str(),
                &smtp.from,
                settings.notification_email(),
            ) {
                Ok(notifier) => {
                    info!(host = %smtp.host, "contact notification enabled");
                    Arc::new(notifier)
                }
                Err(err) => {
                    warn!(error = %err, "SMTP configuration rejected; notification disabled");
                    Arc::new(DisabledContactNotifier)
                }
            }
        }
        None => {
            warn!("SMTP configuration incomplete; contact notification disabled");
            Arc::new(DisabledContactNotifier)
        }
    };

    let skill_service = Arc::new(SkillService::new(Arc::new(DieselSkillRepository::new(
        pool.clone(),
    ))));
    let project_service = Arc::new(ProjectService::new(Arc::new(DieselProjectRepository::new(
        pool.clone(),
    ))));
    let contact_service = Arc::new(ContactService::new(
        Arc::new(DieselContactRepository::new(pool.clone())),
        notifier,
        settings.notification_email(),
    ));

    let uploads_dir = settings.uploads_dir();
    let upload_store = Arc::new(
        FsUploadStore::open(&uploads_dir, &settings.public_base_url()?)
            .wrap_err("failed to open uploads directory")?,
    );
    let upload_service = Arc::new(UploadServiceImpl::new(
        upload_store,
        settings.upload_limits(),
    ));

    let http_state = HttpState {
        login: profile_service.clone(),
        authenticator: profile_service.clone(),
        profile_query: profile_service.clone(),
        profile_command: profile_service,
        skills_query: skill_service.clone(),
        skills_command: skill_service,
        projects_query: project_service.clone(),
        projects_command: project_service,
        contacts_query: contact_service.clone(),
        contacts_command: contact_service,
        uploads: upload_service,
        upload_limits: settings.upload_limits(),
    };

    info!(%bind_addr, "starting portfolio backend");
    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, uploads_dir);
    create_server(health_state, http_state, config)?
        .await
        .wrap_err("server terminated abnormally")
}
