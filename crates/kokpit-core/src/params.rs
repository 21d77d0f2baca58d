//! Parameter structures for kokpit operations.
//!
//! These are plain structs shared by every interface (the CLI today) so that
//! argument parsing concerns stay out of the core. Interfaces convert their
//! own argument types into these via `From`.

use serde::{Deserialize, Serialize};

use crate::{editor::EditorMode, models::StoryStatus};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for opening the story editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenEditor {
    pub mode: EditorMode,
    /// Project the story belongs to
    pub project_id: u64,
    /// Story to edit; required in edit mode and ignored otherwise
    pub story_id: Option<u64>,
}

impl OpenEditor {
    /// Open a blank editor for a new story.
    pub fn create(project_id: u64) -> Self {
        Self {
            mode: EditorMode::Create,
            project_id,
            story_id: None,
        }
    }

    /// Open an editor on an existing story.
    pub fn edit(project_id: u64, story_id: u64) -> Self {
        Self {
            mode: EditorMode::Edit,
            project_id,
            story_id: Some(story_id),
        }
    }
}

/// Parameters for listing a project's stories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListStories {
    pub project_id: u64,
    /// Only return stories in this status
    #[serde(default)]
    pub status: Option<StoryStatus>,
}
