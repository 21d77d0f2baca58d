//! Request body for creating and updating stories.

use serde::{Deserialize, Serialize};

use super::Priority;

/// Body sent to the backend's create and update endpoints.
///
/// `story_points` is left out of the JSON entirely when unset so the backend
/// keeps its own default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoryPayload {
    pub as_a: String,
    pub i_want_to: String,
    pub so_that: String,
    /// Non-empty criteria joined with `\n`
    pub acceptance_criteria: String,
    pub priority: Priority,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
}
