//! Profile domain service: login, the authorization gate, bio updates,
//! credential changes, and the startup bootstrap.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, ProfileCommand, ProfileQuery,
    ProfileRepository, ProfileRepositoryError, TokenAuthenticator, TokenService,
    TokenServiceError,
};
use crate::domain::{
    Error, LoginCredentials, Profile, ProfileId, ProfilePatch, PublicProfile, SocialLinks,
    StoredUpload, UploadKind, Username,
};

/// Bootstrap credentials for the singleton admin profile, sourced from
/// configuration with documented defaults.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: Zeroizing<String>,
}

impl BootstrapAdmin {
    /// Build bootstrap credentials from configured values.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

/// Requested credential changes; both fields optional and independent
/// except that a new password requires the current one.
#[derive(Debug, Default)]
pub struct CredentialsChange {
    pub username: Option<String>,
    pub current_password: Option<Zeroizing<String>>,
    pub new_password: Option<Zeroizing<String>>,
}

/// Successful login: the issued token plus the sanitized profile.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub token: String,
    pub profile: PublicProfile,
}

/// Domain service owning every profile use-case.
#[derive(Clone)]
pub struct ProfileService<R, H, T> {
    repo: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R, H, T> ProfileService<R, H, T> {
    /// Create a new service from its ports.
    pub fn new(repo: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            repo,
            hasher,
            tokens,
        }
    }
}

fn map_repo_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile repository unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile repository error: {message}"))
        }
        ProfileRepositoryError::DuplicateUsername { username } => {
            Error::conflict(format!("username {username:?} is already taken"))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    let PasswordHashError::Hash { message } = error;
    Error::internal(format!("password hashing failed: {message}"))
}

impl<R, H, T> ProfileService<R, H, T>
where
    R: ProfileRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn load_own(&self, caller: ProfileId) -> Result<Profile, Error> {
        self.repo
            .find_by_id(caller)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("profile not found"))
    }

    async fn persist(&self, profile: &Profile) -> Result<(), Error> {
        self.repo.update(profile).await.map_err(map_repo_error)
    }

    /// Create the singleton admin profile if none exists yet.
    ///
    /// Idempotent startup invariant, not an API operation: a concurrent
    /// bootstrap losing the insert race is treated as success.
    pub async fn bootstrap(&self, admin: &BootstrapAdmin) -> Result<(), Error> {
        if self.repo.find().await.map_err(map_repo_error)?.is_some() {
            debug!("admin profile already present; bootstrap skipped");
            return Ok(());
        }

        let username = Username::new(&admin.username)
            .map_err(|err| Error::internal(format!("configured admin username invalid: {err}")))?;
        let password_hash = self
            .hasher
            .hash(admin.password.as_str())
            .map_err(map_hash_error)?;

        let now = Utc::now();
        let profile = Profile {
            id: ProfileId::random(),
            username,
            password_hash,
            name: "Admin User".to_owned(),
            email: "admin@example.com".to_owned(),
            role: "Software Developer".to_owned(),
            location: "San Francisco, California".to_owned(),
            social: SocialLinks {
                github: Some("https://github.com".to_owned()),
                twitter: Some("https://twitter.com".to_owned()),
                linkedin: None,
            },
            skills: vec!["Rust".to_owned(), "PostgreSQL".to_owned(), "Actix".to_owned()],
            education: Vec::new(),
            resume_url: None,
            profile_picture: None,
            created_at: now,
            updated_at: now,
        };

        match self.repo.insert(&profile).await {
            Ok(()) => {
                info!(username = %profile.username, "admin profile created");
                Ok(())
            }
            Err(ProfileRepositoryError::DuplicateUsername { .. }) => {
                debug!("admin profile created concurrently; bootstrap skipped");
                Ok(())
            }
            Err(err) => Err(map_repo_error(err)),
        }
    }
}

#[async_trait]
impl<R, H, T> LoginService for ProfileService<R, H, T>
where
    R: ProfileRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let Some(profile) = self
            .repo
            .find_by_username(credentials.username())
            .await
            .map_err(map_repo_error)?
        else {
            return Err(Error::unauthorized("invalid credentials"));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &profile.password_hash)
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::unauthorized("invalid credentials"));
        }

        let token = self.tokens.issue(profile.id).map_err(|err| match err {
            TokenServiceError::Issue { message } => {
                Error::internal(format!("token issuance failed: {message}"))
            }
            TokenServiceError::Invalid => Error::internal("token issuance failed"),
        })?;

        Ok(LoginOutcome {
            token,
            profile: profile.into(),
        })
    }
}

#[async_trait]
impl<R, H, T> TokenAuthenticator for ProfileService<R, H, T>
where
    R: ProfileRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn authenticate(&self, token: &str) -> Result<ProfileId, Error> {
        let profile_id = self
            .tokens
            .verify(token)
            .map_err(|_| Error::unauthorized("invalid or expired token"))?;

        // A token that outlives its profile is as good as forged.
        match self
            .repo
            .find_by_id(profile_id)
            .await
            .map_err(map_repo_error)?
        {
            Some(profile) => Ok(profile.id),
            None => {
                warn!(%profile_id, "token references a profile that no longer exists");
                Err(Error::unauthorized("invalid or expired token"))
            }
        }
    }
}

#[async_trait]
impl<R, H, T> ProfileQuery for ProfileService<R, H, T>
where
    R: ProfileRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn public_profile(&self) -> Result<PublicProfile, Error> {
        self.repo
            .find()
            .await
            .map_err(map_repo_error)?
            .map(PublicProfile::from)
            .ok_or_else(|| Error::not_found("profile not found"))
    }

    async fn own_profile(&self, caller: ProfileId) -> Result<PublicProfile, Error> {
        self.load_own(caller).await.map(PublicProfile::from)
    }
}

#[async_trait]
impl<R, H, T> ProfileCommand for ProfileService<R, H, T>
where
    R: ProfileRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn update_profile(
        &self,
        caller: ProfileId,
        patch: ProfilePatch,
    ) -> Result<PublicProfile, Error> {
        let mut profile = self.load_own(caller).await?;
        patch.apply(&mut profile);
        profile.updated_at = Utc::now();
        self.persist(&profile).await?;
        Ok(profile.into())
    }

    async fn update_credentials(
        &self,
        caller: ProfileId,
        change: CredentialsChange,
    ) -> Result<PublicProfile, Error> {
        let mut profile = self.load_own(caller).await?;
        let CredentialsChange {
            username,
            current_password,
            new_password,
        } = change;

        if let Some(new_password) = new_password {
            let Some(current) = current_password else {
                return Err(Error::invalid_request(
                    "current password is required to set a new password",
                ));
            };
            let matches = self
                .hasher
                .verify(current.as_str(), &profile.password_hash)
                .map_err(map_hash_error)?;
            if !matches {
                return Err(Error::invalid_request("current password is incorrect"));
            }
            profile.password_hash = self
                .hasher
                .hash(new_password.as_str())
                .map_err(map_hash_error)?;
        }

        if let Some(candidate) = username {
            let candidate = Username::new(&candidate)
                .map_err(|err| Error::invalid_request(err.to_string()))?;
            if candidate != profile.username {
                let existing = self
                    .repo
                    .find_by_username(candidate.as_ref())
                    .await
                    .map_err(map_repo_error)?;
                if existing.is_some_and(|other| other.id != caller) {
                    return Err(Error::conflict(format!(
                        "username {:?} is already taken",
                        candidate.as_ref()
                    )));
                }
                profile.username = candidate;
            }
        }

        profile.updated_at = Utc::now();
        self.persist(&profile).await?;
        Ok(profile.into())
    }

    async fn attach_upload(
        &self,
        caller: ProfileId,
        kind: UploadKind,
        upload: StoredUpload,
    ) -> Result<PublicProfile, Error> {
        let mut profile = self.load_own(caller).await?;
        match kind {
            UploadKind::ProfileImage => profile.profile_picture = Some(upload.url),
            UploadKind::Resume => profile.resume_url = Some(upload.url),
            UploadKind::ProjectImage => {
                return Err(Error::invalid_request(
                    "project images are not attached to the profile",
                ));
            }
        }
        profile.updated_at = Utc::now();
        self.persist(&profile).await?;
        Ok(profile.into())
    }
}
