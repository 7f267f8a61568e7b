//! Inbound HTTP adapter: handlers, extractors, DTOs, and error mapping.

pub mod auth;
pub mod contacts;
pub mod error;
pub mod health;
pub mod profile;
pub mod projects;
pub mod skills;
pub mod state;
pub mod uploads;

pub use crate::domain::ApiResult;
pub use error::TRACE_ID_HEADER;

use serde::{Deserialize, Deserializer};

/// Deserialize a field that distinguishes "absent" from "explicit null":
/// absent stays `None` via `#[serde(default)]`, `null` becomes
/// `Some(None)`, and a value becomes `Some(Some(value))`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
