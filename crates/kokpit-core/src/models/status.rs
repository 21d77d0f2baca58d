//! Priority and workflow status enumerations for stories.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of story priorities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    /// Default for new stories
    #[default]
    Medium,
    High,
    Critical,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl Priority {
    /// Wire representation used by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    /// Human-readable label for badges.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }
}

/// Workflow status of a story as tracked by the backend.
///
/// The editor never changes the status; it is shown read-only in detail
/// views and used as a list filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoryStatus {
    #[default]
    Draft,
    PendingReview,
    Approved,
    InProgress,
    Testing,
    Done,
    Rejected,
}

impl FromStr for StoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(StoryStatus::Draft),
            "pending_review" | "pendingreview" => Ok(StoryStatus::PendingReview),
            "approved" => Ok(StoryStatus::Approved),
            "in_progress" | "inprogress" => Ok(StoryStatus::InProgress),
            "testing" => Ok(StoryStatus::Testing),
            "done" => Ok(StoryStatus::Done),
            "rejected" => Ok(StoryStatus::Rejected),
            _ => Err(format!("Invalid story status: {s}")),
        }
    }
}

impl StoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryStatus::Draft => "draft",
            StoryStatus::PendingReview => "pending_review",
            StoryStatus::Approved => "approved",
            StoryStatus::InProgress => "in_progress",
            StoryStatus::Testing => "testing",
            StoryStatus::Done => "done",
            StoryStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StoryStatus::Draft => "Draft",
            StoryStatus::PendingReview => "Pending review",
            StoryStatus::Approved => "Approved",
            StoryStatus::InProgress => "In progress",
            StoryStatus::Testing => "Testing",
            StoryStatus::Done => "Done",
            StoryStatus::Rejected => "Rejected",
        }
    }
}
