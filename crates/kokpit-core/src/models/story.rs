//! Story record as returned by the backend.

use jiff::{civil::DateTime, tz::TimeZone, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};

use super::{Priority, StoryStatus};

/// A user story persisted by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Story {
    /// Unique identifier for the story
    pub id: u64,

    /// ID of the owning project
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_id: u64,

    /// Who the story is for
    #[serde(default, deserialize_with = "string_or_null")]
    pub as_a: String,

    /// What they want to do
    #[serde(default, deserialize_with = "string_or_null")]
    pub i_want_to: String,

    /// The benefit they get
    #[serde(default, deserialize_with = "string_or_null")]
    pub so_that: String,

    /// Newline-separated acceptance criteria
    #[serde(default)]
    pub acceptance_criteria: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,

    #[serde(default)]
    pub story_points: Option<u32>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: StoryStatus,

    /// Server-side revision counter; read-only for clients
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: u32,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_timestamp"
    )]
    pub created_at: Option<Timestamp>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_timestamp"
    )]
    pub updated_at: Option<Timestamp>,
}

impl Story {
    /// Acceptance criteria split into individual entries, skipping blank
    /// lines.
    pub fn criteria_lines(&self) -> Vec<String> {
        self.acceptance_criteria
            .as_deref()
            .map(|text| {
                text.split('\n')
                    .filter(|line| !line.trim().is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Accepts RFC 3339 timestamps as well as offset-less date-times, which are
/// taken to be UTC. Anything unparseable becomes `None` rather than failing
/// the whole record.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|text| {
        text.parse::<Timestamp>().ok().or_else(|| {
            text.parse::<DateTime>()
                .ok()
                .and_then(|dt| dt.to_zoned(TimeZone::UTC).ok())
                .map(|zoned| zoned.timestamp())
        })
    }))
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    null_as_default(deserializer)
}

/// Reads `null` as the type's default, like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
