//! Skills owned by the site-owner profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ProfileId;

/// Default proficiency applied when a skill is added without a level.
pub const DEFAULT_SKILL_LEVEL: i32 = 75;

/// Proficiency in the closed range `[0, 100]`.
///
/// Construction clamps rather than rejects: out-of-range input is pulled
/// to the nearest bound so a level can never be stored out of range.
///
/// # Examples
/// ```
/// use backend::domain::SkillLevel;
///
/// assert_eq!(SkillLevel::clamped(130).value(), 100);
/// assert_eq!(SkillLevel::clamped(-5).value(), 0);
/// assert_eq!(SkillLevel::clamped(40).value(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = i32, example = 75)]
pub struct SkillLevel(i32);

impl SkillLevel {
    /// Construct a level, clamping into `[0, 100]`.
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(0, 100))
    }

    /// The site-wide default level.
    pub fn default_level() -> Self {
        Self(DEFAULT_SKILL_LEVEL)
    }

    /// Underlying numeric value.
    pub fn value(self) -> i32 {
        self.0
    }
}

impl Default for SkillLevel {
    fn default() -> Self {
        Self::default_level()
    }
}

/// A named skill displayed on the public site, owned by the profile that
/// created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[schema(value_type = String, example = "8f5c2f63-4aa1-4d3a-9d5e-d6a0f2b8c111")]
    pub id: Uuid,
    pub owner_id: ProfileId,
    pub name: String,
    pub level: SkillLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Skill {
    /// True when `caller` owns this skill.
    pub fn is_owned_by(&self, caller: ProfileId) -> bool {
        self.owner_id == caller
    }
}

/// Explicit patch for a skill; absent fields keep the stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillPatch {
    pub name: Option<String>,
    pub level: Option<SkillLevel>,
}

impl SkillPatch {
    /// Merge this patch into `skill`.
    pub fn apply(self, skill: &mut Skill) {
        let Self { name, level } = self;
        if let Some(name) = name {
            skill.name = name;
        }
        if let Some(level) = level {
            skill.level = level;
        }
    }
}
