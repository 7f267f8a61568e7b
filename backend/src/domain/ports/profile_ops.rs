//! Driving ports for profile reads and mutations.

use async_trait::async_trait;

use crate::domain::profile_service::CredentialsChange;
use crate::domain::{Error, ProfileId, ProfilePatch, PublicProfile, StoredUpload, UploadKind};

/// Read-side port for the singleton profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// The sanitized profile for anonymous callers.
    async fn public_profile(&self) -> Result<PublicProfile, Error>;

    /// The sanitized profile for the authenticated owner.
    async fn own_profile(&self, caller: ProfileId) -> Result<PublicProfile, Error>;
}

/// Write-side port for the singleton profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Merge a bio patch into the stored profile.
    async fn update_profile(
        &self,
        caller: ProfileId,
        patch: ProfilePatch,
    ) -> Result<PublicProfile, Error>;

    /// Change username and/or password under the documented guards.
    async fn update_credentials(
        &self,
        caller: ProfileId,
        change: CredentialsChange,
    ) -> Result<PublicProfile, Error>;

    /// Patch the URL field matching an accepted upload onto the profile.
    async fn attach_upload(
        &self,
        caller: ProfileId,
        kind: UploadKind,
        upload: StoredUpload,
    ) -> Result<PublicProfile, Error>;
}
