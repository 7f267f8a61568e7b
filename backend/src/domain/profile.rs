//! Site-owner profile: the single-tenant admin identity plus public bio data.
//!
//! Exactly one [`Profile`] exists system-wide. It is created by the startup
//! bootstrap when absent and never deleted; every other aggregate hangs off
//! it directly (skills) or implicitly (projects, contact messages).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Stable identifier for the singleton profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors raised by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameValidationError {
    /// Username was blank once trimmed.
    Empty,
    /// Username exceeded the storage limit.
    TooLong { max: usize },
}

impl fmt::Display for UsernameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "username must not be empty"),
            Self::TooLong { max } => write!(f, "username must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UsernameValidationError {}

/// Maximum accepted username length.
pub const USERNAME_MAX: usize = 64;

/// Unique login name of the site owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "admin")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`], trimming surrounding whitespace.
    pub fn new(value: impl AsRef<str>) -> Result<Self, UsernameValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UsernameValidationError::Empty);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UsernameValidationError::TooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Social links shown on the public site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// A single education history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub year: String,
}

/// The singleton site-owner record.
///
/// ## Invariants
/// - Exactly one profile exists after bootstrap; `username` is unique.
/// - `password_hash` never leaves the domain: outbound representations go
///   through [`PublicProfile`], which strips it.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub username: Username,
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub location: String,
    pub social: SocialLinks,
    /// Legacy inline skill names kept for the public site's about section.
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub resume_url: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sanitized view of [`Profile`] safe for any caller.
///
/// This is the only serialisable profile shape; the credential hash has no
/// representation here by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: ProfileId,
    pub username: Username,
    pub name: String,
    pub email: String,
    pub role: String,
    pub location: String,
    pub social: SocialLinks,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for PublicProfile {
    fn from(value: Profile) -> Self {
        let Profile {
            id,
            username,
            password_hash: _,
            name,
            email,
            role,
            location,
            social,
            skills,
            education,
            resume_url,
            profile_picture,
            created_at,
            updated_at,
        } = value;
        Self {
            id,
            username,
            name,
            email,
            role,
            location,
            social,
            skills,
            education,
            resume_url,
            profile_picture,
            created_at,
            updated_at,
        }
    }
}

/// Explicit patch for profile bio fields.
///
/// Merge policy, applied uniformly across the API: an absent field keeps
/// the stored value, a present value overwrites it (empty strings
/// included), and `Some(None)` on a nullable field clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub social: Option<SocialLinks>,
    pub skills: Option<Vec<String>>,
    pub education: Option<Vec<EducationEntry>>,
    /// `Some(None)` clears the stored resume URL.
    pub resume_url: Option<Option<String>>,
}

impl ProfilePatch {
    /// True when the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge this patch into `profile`. Total and pure: every combination
    /// of present/absent fields produces a well-defined result.
    pub fn apply(self, profile: &mut Profile) {
        let Self {
            name,
            email,
            role,
            location,
            social,
            skills,
            education,
            resume_url,
        } = self;
        if let Some(name) = name {
            profile.name = name;
        }
        if let Some(email) = email {
            profile.email = email;
        }
        if let Some(role) = role {
            profile.role = role;
        }
        if let Some(location) = location {
            profile.location = location;
        }
        if let Some(social) = social {
            profile.social = social;
        }
        if let Some(skills) = skills {
            profile.skills = skills;
        }
        if let Some(education) = education {
            profile.education = education;
        }
        if let Some(resume_url) = resume_url {
            profile.resume_url = resume_url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fixture_profile() -> Profile {
        Profile {
            id: ProfileId::random(),
            username: Username::new("admin").expect("valid username"),
            password_hash: "$argon2id$stub".to_owned(),
            name: "Admin User".to_owned(),
            email: "admin@example.com".to_owned(),
            role: "Software Developer".to_owned(),
            location: "San Francisco, California".to_owned(),
            social: SocialLinks {
                github: Some("https://github.com".to_owned()),
                twitter: None,
                linkedin: None,
            },
            skills: vec!["Rust".to_owned()],
            education: Vec::new(),
            resume_url: Some("https://example.com/resume.pdf".to_owned()),
            profile_picture: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("admin", Ok("admin"))]
    #[case("  admin  ", Ok("admin"))]
    #[case("   ", Err(UsernameValidationError::Empty))]
    fn username_validation(
        #[case] input: &str,
        #[case] expected: Result<&str, UsernameValidationError>,
    ) {
        let result = Username::new(input);
        match expected {
            Ok(value) => assert_eq!(result.expect("valid").as_ref(), value),
            Err(err) => assert_eq!(result.expect_err("invalid"), err),
        }
    }

    #[rstest]
    fn username_rejects_overlong_input() {
        let long = "a".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(long).expect_err("too long"),
            UsernameValidationError::TooLong { max: USERNAME_MAX }
        );
    }

    #[rstest]
    fn public_view_has_no_hash_representation() {
        let profile = fixture_profile();
        let public = PublicProfile::from(profile.clone());
        let json = serde_json::to_string(&public).expect("serialise");
        assert!(!json.contains("passwordHash"));
        assert!(!json.contains("argon2id"));
        assert_eq!(public.username, profile.username);
    }

    #[rstest]
    fn empty_patch_changes_nothing() {
        let mut profile = fixture_profile();
        let before = profile.clone();
        ProfilePatch::default().apply(&mut profile);
        assert_eq!(profile, before);
    }

    #[rstest]
    fn patch_overwrites_with_falsy_values() {
        let mut profile = fixture_profile();
        let patch = ProfilePatch {
            location: Some(String::new()),
            ..ProfilePatch::default()
        };
        patch.apply(&mut profile);
        assert_eq!(profile.location, "");
        // Untouched fields keep their stored values.
        assert_eq!(profile.name, "Admin User");
    }

    #[rstest]
    fn explicit_null_clears_resume_url() {
        let mut profile = fixture_profile();
        let patch = ProfilePatch {
            resume_url: Some(None),
            ..ProfilePatch::default()
        };
        patch.apply(&mut profile);
        assert_eq!(profile.resume_url, None);
    }

    #[rstest]
    fn absent_resume_url_is_kept() {
        let mut profile = fixture_profile();
        ProfilePatch {
            name: Some("New Name".to_owned()),
            ..ProfilePatch::default()
        }
        .apply(&mut profile);
        assert_eq!(
            profile.resume_url.as_deref(),
            Some("https://example.com/resume.pdf")
        );
    }

    #[rstest]
    fn social_replaces_the_whole_object() {
        let mut profile = fixture_profile();
        ProfilePatch {
            social: Some(SocialLinks {
                linkedin: Some("https://linkedin.com/in/admin".to_owned()),
                ..SocialLinks::default()
            }),
            ..ProfilePatch::default()
        }
        .apply(&mut profile);
        assert_eq!(profile.social.github, None);
        assert_eq!(
            profile.social.linkedin.as_deref(),
            Some("https://linkedin.com/in/admin")
        );
    }
}
