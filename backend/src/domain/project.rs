//! Portfolio projects shown on the public site.
//!
//! Projects are global in this single-tenant system: creation requires an
//! authenticated caller but no per-record owner is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Raw tag input as accepted over the wire: either a comma-separated
/// string (legacy admin form behaviour) or an already-split array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum TagsInput {
    /// `"rust, actix ,web"`
    Joined(String),
    /// `["rust", "actix", "web"]`
    Split(Vec<String>),
}

/// Normalize tag input into the stored representation.
///
/// Comma-separated strings are split, every segment trimmed, and empty
/// segments dropped. Arrays receive the same trim-and-drop treatment, so
/// normalization is idempotent: feeding the output back in reproduces it.
///
/// # Examples
/// ```
/// use backend::domain::{normalize_tags, TagsInput};
///
/// let joined = normalize_tags(TagsInput::Joined("a, b ,c".into()));
/// assert_eq!(joined, vec!["a", "b", "c"]);
/// assert_eq!(normalize_tags(TagsInput::Split(joined.clone())), joined);
/// ```
pub fn normalize_tags(input: TagsInput) -> Vec<String> {
    let raw: Vec<String> = match input {
        TagsInput::Joined(joined) => joined.split(',').map(str::to_owned).collect(),
        TagsInput::Split(split) => split,
    };
    raw.into_iter()
        .map(|tag| tag.trim().to_owned())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[schema(value_type = String, example = "7a0e55b0-6a2f-43d5-b61a-6a3f4f1f3b42")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// URL of the cover image, usually produced by the upload endpoint.
    pub image: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub live_link: Option<String>,
    pub code_link: Option<String>,
}

impl ProjectDraft {
    /// Build a draft, normalizing tags on the way in.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        tags: TagsInput,
        live_link: Option<String>,
        code_link: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: image.into(),
            tags: normalize_tags(tags),
            live_link,
            code_link,
        }
    }
}

/// Explicit patch for a project. Absent fields keep the stored values;
/// present values overwrite (empty strings included); `Some(None)` clears
/// the nullable links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub tags: Option<TagsInput>,
    pub live_link: Option<Option<String>>,
    pub code_link: Option<Option<String>>,
}

impl ProjectPatch {
    /// Merge this patch into `project`, re-normalizing tags when present.
    pub fn apply(self, project: &mut Project) {
        let Self {
            title,
            description,
            image,
            tags,
            live_link,
            code_link,
        } = self;
        if let Some(title) = title {
            project.title = title;
        }
        if let Some(description) = description {
            project.description = description;
        }
        if let Some(image) = image {
            project.image = image;
        }
        if let Some(tags) = tags {
            project.tags = normalize_tags(tags);
        }
        if let Some(live_link) = live_link {
            project.live_link = live_link;
        }
        if let Some(code_link) = code_link {
            project.code_link = code_link;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fixture_project() -> Project {
        Project {
            id: Uuid::new_v4(),
            title: "Portfolio".to_owned(),
            description: "A personal site".to_owned(),
            image: "/uploads/projects/project-1.png".to_owned(),
            tags: vec!["rust".to_owned(), "actix".to_owned()],
            live_link: Some("https://example.com".to_owned()),
            code_link: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("a, b ,c", vec!["a", "b", "c"])]
    #[case("a,,b,  ,c", vec!["a", "b", "c"])]
    #[case("", Vec::<&str>::new())]
    #[case("  solo  ", vec!["solo"])]
    fn joined_tags_are_split_and_trimmed(#[case] input: &str, #[case] expected: Vec<&str>) {
        assert_eq!(normalize_tags(TagsInput::Joined(input.to_owned())), expected);
    }

    #[rstest]
    fn array_tags_pass_through_unchanged() {
        let tags = vec!["a".to_owned(), "b".to_owned()];
        assert_eq!(normalize_tags(TagsInput::Split(tags.clone())), tags);
    }

    #[rstest]
    fn normalization_is_idempotent() {
        let once = normalize_tags(TagsInput::Joined("a, b ,c".to_owned()));
        let twice = normalize_tags(TagsInput::Split(once.clone()));
        assert_eq!(once, twice);
    }

    #[rstest]
    fn draft_normalizes_tags_on_construction() {
        let draft = ProjectDraft::new(
            "t",
            "d",
            "i",
            TagsInput::Joined("web , api".to_owned()),
            None,
            None,
        );
        assert_eq!(draft.tags, vec!["web", "api"]);
    }

    #[rstest]
    fn patch_keeps_absent_fields() {
        let mut project = fixture_project();
        ProjectPatch {
            title: Some("Renamed".to_owned()),
            ..ProjectPatch::default()
        }
        .apply(&mut project);
        assert_eq!(project.title, "Renamed");
        assert_eq!(project.description, "A personal site");
        assert_eq!(project.live_link.as_deref(), Some("https://example.com"));
    }

    #[rstest]
    fn patch_overwrites_with_empty_string() {
        let mut project = fixture_project();
        ProjectPatch {
            description: Some(String::new()),
            ..ProjectPatch::default()
        }
        .apply(&mut project);
        assert_eq!(project.description, "");
    }

    #[rstest]
    fn explicit_null_clears_live_link() {
        let mut project = fixture_project();
        ProjectPatch {
            live_link: Some(None),
            ..ProjectPatch::default()
        }
        .apply(&mut project);
        assert_eq!(project.live_link, None);
    }

    #[rstest]
    fn patch_renormalizes_tags() {
        let mut project = fixture_project();
        ProjectPatch {
            tags: Some(TagsInput::Joined(" api ,, web ".to_owned())),
            ..ProjectPatch::default()
        }
        .apply(&mut project);
        assert_eq!(project.tags, vec!["api", "web"]);
    }

    #[rstest]
    fn tags_input_deserialises_both_shapes() {
        let joined: TagsInput = serde_json::from_str("\"a, b\"").expect("joined");
        assert_eq!(joined, TagsInput::Joined("a, b".to_owned()));
        let split: TagsInput = serde_json::from_str("[\"a\",\"b\"]").expect("split");
        assert_eq!(split, TagsInput::Split(vec!["a".to_owned(), "b".to_owned()]));
    }
}
