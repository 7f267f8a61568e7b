//! Row structs bridging Diesel and the domain entities.
//!
//! Read rows derive `Queryable`/`Selectable`; write rows derive
//! `Insertable` or `AsChangeset`. Conversion into domain types revalidates
//! the invariant-carrying fields so a hand-edited database row cannot
//! smuggle invalid data past the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    ContactMessage, EducationEntry, MessageStatus, Profile, ProfileId, Project, Skill, SkillLevel,
    Username,
};

use super::schema::{contact_messages, profiles, projects, skills};

/// Conversion failures when mapping a row into its domain entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored row is invalid: {message}")]
pub struct RowConversionError {
    pub message: String,
}

impl RowConversionError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProfileRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub location: String,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub skills: Vec<String>,
    pub education: serde_json::Value,
    pub resume_url: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = RowConversionError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let username = Username::new(&row.username)
            .map_err(|err| RowConversionError::new(format!("username: {err}")))?;
        let education: Vec<EducationEntry> = serde_json::from_value(row.education)
            .map_err(|err| RowConversionError::new(format!("education: {err}")))?;
        Ok(Self {
            id: ProfileId::from_uuid(row.id),
            username,
            password_hash: row.password_hash,
            name: row.name,
            email: row.email,
            role: row.role,
            location: row.location,
            social: crate::domain::SocialLinks {
                github: row.github,
                twitter: row.twitter,
                linkedin: row.linkedin,
            },
            skills: row.skills,
            education,
            resume_url: row.resume_url,
            profile_picture: row.profile_picture,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = profiles)]
pub struct NewProfileRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub location: &'a str,
    pub github: Option<&'a str>,
    pub twitter: Option<&'a str>,
    pub linkedin: Option<&'a str>,
    pub skills: &'a [String],
    pub education: serde_json::Value,
    pub resume_url: Option<&'a str>,
    pub profile_picture: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = profiles)]
#[diesel(treat_none_as_null = true)]
pub struct ProfileRowChanges<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub location: &'a str,
    pub github: Option<&'a str>,
    pub twitter: Option<&'a str>,
    pub linkedin: Option<&'a str>,
    pub skills: &'a [String],
    pub education: serde_json::Value,
    pub resume_url: Option<&'a str>,
    pub profile_picture: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Serialise education entries for storage; infallible for the entry type.
pub fn education_to_json(education: &[EducationEntry]) -> serde_json::Value {
    serde_json::to_value(education).unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))
}

#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SkillRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SkillRow> for Skill {
    fn from(row: SkillRow) -> Self {
        Self {
            id: row.id,
            owner_id: ProfileId::from_uuid(row.owner_id),
            name: row.name,
            // The database CHECK keeps levels in range; clamping again is
            // a no-op for valid rows and repairs hand-edited ones.
            level: SkillLevel::clamped(row.level),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = skills)]
pub struct NewSkillRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: &'a str,
    pub level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = skills)]
pub struct SkillRowChanges<'a> {
    pub name: &'a str,
    pub level: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub live_link: Option<String>,
    pub code_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            image: row.image,
            tags: row.tags,
            live_link: row.live_link,
            code_link: row.code_link,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub image: &'a str,
    pub tags: &'a [String],
    pub live_link: Option<&'a str>,
    pub code_link: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub struct ProjectRowChanges<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub image: &'a str,
    pub tags: &'a [String],
    pub live_link: Option<&'a str>,
    pub code_link: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = contact_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ContactMessageRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub notification_sent: bool,
    pub notification_email: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ContactMessageRow> for ContactMessage {
    type Error = RowConversionError;

    fn try_from(row: ContactMessageRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<MessageStatus>()
            .map_err(|err| RowConversionError::new(format!("status: {err}")))?;
        Ok(Self {
            id: row.id,
            name: row.name,
            email: row.email,
            subject: row.subject,
            message: row.message,
            status,
            notification_sent: row.notification_sent,
            notification_email: row.notification_email,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = contact_messages)]
pub struct NewContactMessageRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
    pub status: &'a str,
    pub notification_sent: bool,
    pub notification_email: &'a str,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn skill_rows_clamp_out_of_range_levels() {
        let row = SkillRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Rust".to_owned(),
            level: 140,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let skill = Skill::from(row);
        assert_eq!(skill.level.value(), 100);
    }

    #[rstest]
    fn contact_rows_reject_unknown_status_values() {
        let row = ContactMessageRow {
            id: Uuid::new_v4(),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            subject: "Hi".to_owned(),
            message: "Hello".to_owned(),
            status: "pending".to_owned(),
            notification_sent: false,
            notification_email: "hello@example.com".to_owned(),
            created_at: Utc::now(),
        };
        let err = ContactMessage::try_from(row).expect_err("invalid status");
        assert!(err.to_string().contains("pending"));
    }

    #[rstest]
    fn profile_rows_round_trip_education_json() {
        let education = vec![EducationEntry {
            institution: "MIT".to_owned(),
            degree: "BSc".to_owned(),
            year: "2020".to_owned(),
        }];
        let json = education_to_json(&education);
        let row = ProfileRow {
            id: Uuid::new_v4(),
            username: "admin".to_owned(),
            password_hash: "h".to_owned(),
            name: "Admin".to_owned(),
            email: "a@b.c".to_owned(),
            role: "Dev".to_owned(),
            location: "SF".to_owned(),
            github: None,
            twitter: None,
            linkedin: None,
            skills: Vec::new(),
            education: json,
            resume_url: None,
            profile_picture: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let profile = Profile::try_from(row).expect("valid row");
        assert_eq!(profile.education, education);
    }
}
