//! Application configuration loaded via OrthoConfig.
//!
//! Every value can come from the environment (prefix `PORTFOLIO_`), a
//! config file, or CLI flags; accessors supply the documented defaults so
//! a bare development environment boots with no configuration at all
//! except the database URL.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::UploadLimits;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_NOTIFICATION_EMAIL: &str = "hello@example.com";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Errors raised while interpreting configured values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("invalid public base URL {value:?}: {message}")]
    InvalidBaseUrl { value: String, message: String },
    #[error("PORTFOLIO_DATABASE_URL is required")]
    MissingDatabaseUrl,
}

/// SMTP transport settings; notification is disabled unless all are set,
/// mirroring the original system's "incomplete email configuration"
/// warning path.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: Option<u16>,
    pub username: String,
    pub password: Zeroizing<String>,
    pub from: String,
}

/// Configuration values for the portfolio backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTFOLIO")]
pub struct AppSettings {
    /// Socket address to bind, default `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Required.
    pub database_url: Option<String>,
    /// Secret signing the stateless admin token. A dev-only fallback is
    /// derived when absent; set it in any real deployment.
    pub auth_secret: Option<String>,
    /// Token validity in hours, default 24.
    pub token_ttl_hours: Option<i64>,
    /// Bootstrap admin username, default `admin`.
    pub admin_username: Option<String>,
    /// Bootstrap admin password, default `admin123`.
    pub admin_password: Option<String>,
    /// Directory uploaded blobs are stored in, default `uploads`.
    pub uploads_dir: Option<PathBuf>,
    /// Externally visible origin for upload URLs, default
    /// `http://localhost:8080`.
    #[ortho_config(default = String::from(DEFAULT_PUBLIC_BASE_URL))]
    pub public_base_url: Option<String>,
    /// Image upload limit in bytes, default 5 MiB.
    pub image_max_bytes: Option<u64>,
    /// Resume upload limit in bytes, default 10 MiB.
    pub resume_max_bytes: Option<u64>,
    /// Inbox address contact notifications are sent to.
    pub notification_email: Option<String>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    /// `From` mailbox for notifications, e.g. `Portfolio <noreply@…>`.
    pub smtp_from: Option<String>,
}

impl AppSettings {
    /// Parsed bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            }
        })
    }

    /// Database URL; required.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Token signing secret; falls back to a fixed dev secret.
    pub fn auth_secret(&self) -> Zeroizing<Vec<u8>> {
        let secret = self
            .auth_secret
            .as_deref()
            .unwrap_or("portfolio-dev-secret");
        Zeroizing::new(secret.as_bytes().to_vec())
    }

    /// Whether the secret is the built-in development fallback.
    pub fn uses_dev_secret(&self) -> bool {
        self.auth_secret.is_none()
    }

    /// Token validity window.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS))
    }

    /// Bootstrap admin username.
    pub fn admin_username(&self) -> &str {
        self.admin_username
            .as_deref()
            .unwrap_or(DEFAULT_ADMIN_USERNAME)
    }

    /// Bootstrap admin password.
    pub fn admin_password(&self) -> &str {
        self.admin_password
            .as_deref()
            .unwrap_or(DEFAULT_ADMIN_PASSWORD)
    }

    /// Uploads root directory.
    pub fn uploads_dir(&self) -> PathBuf {
        self.uploads_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOADS_DIR))
    }

    /// Parsed public base URL for served uploads.
    pub fn public_base_url(&self) -> Result<url::Url, SettingsError> {
        let raw = self
            .public_base_url
            .as_deref()
            .unwrap_or(DEFAULT_PUBLIC_BASE_URL);
        url::Url::parse(raw).map_err(|err| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Upload size limits.
    pub fn upload_limits(&self) -> UploadLimits {
        let defaults = UploadLimits::default();
        UploadLimits {
            image_max_bytes: self.image_max_bytes.unwrap_or(defaults.image_max_bytes),
            resume_max_bytes: self.resume_max_bytes.unwrap_or(defaults.resume_max_bytes),
        }
    }

    /// Inbox address for contact notifications.
    pub fn notification_email(&self) -> &str {
        self.notification_email
            .as_deref()
            .unwrap_or(DEFAULT_NOTIFICATION_EMAIL)
    }

    /// Complete SMTP settings, or `None` when any required piece is
    /// missing (notification then runs disabled).
    pub fn smtp(&self) -> Option<SmtpSettings> {
        match (
            self.smtp_host.as_deref(),
            self.smtp_username.as_deref(),
            self.smtp_password.as_deref(),
        ) {
            (Some(host), Some(username), Some(password)) => Some(SmtpSettings {
                host: host.to_owned(),
                port: self.smtp_port,
                username: username.to_owned(),
                password: Zeroizing::new(password.to_owned()),
                from: self
                    .smtp_from
                    .clone()
                    .unwrap_or_else(|| format!("Portfolio <{username}>")),
            }),
            _ => None,
        }
    }
}
