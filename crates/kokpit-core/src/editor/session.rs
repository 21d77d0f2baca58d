//! Single open editor, as seen by the surrounding page.

use log::debug;

use super::{
    draft::{EditorMode, StoryDraft},
    save::{save_draft, SaveReport},
};
use crate::{
    backend::StoryBackend,
    error::{KokpitError, Result},
    params::OpenEditor,
};

/// Event emitted when a save finishes and the editor closes.
///
/// The caller should reload the detail view of `story_id` in `project_id`.
#[derive(Debug)]
pub struct SaveCompleted {
    pub project_id: u64,
    pub story_id: u64,
    pub mode: EditorMode,
    pub report: SaveReport,
}

/// Holds at most one open story editor.
///
/// Opening a new editor discards the previous draft. The draft only survives
/// a failed save; a successful save or [`close`](Self::close) drops it.
pub struct EditorSession<B> {
    backend: B,
    draft: Option<StoryDraft>,
}

impl<B: StoryBackend> EditorSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            draft: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// Open an editor, replacing any open one.
    ///
    /// Edit mode fetches the story first; if that fails the session stays
    /// closed and the error is returned.
    pub async fn open(&mut self, params: &OpenEditor) -> Result<&mut StoryDraft> {
        if self.draft.take().is_some() {
            debug!("Discarding previously open story draft");
        }

        let draft = match params.mode {
            EditorMode::Create => StoryDraft::new(params.project_id),
            EditorMode::Edit => {
                let story_id = params.story_id.ok_or_else(|| {
                    KokpitError::invalid_input("story_id").with_reason("required in edit mode")
                })?;
                let story = self.backend.get_story(story_id).await?;
                StoryDraft::from_story(params.project_id, &story)
            }
        };

        debug!(
            "Opened story editor ({:?}) for project {}",
            draft.mode(),
            draft.target_project_id()
        );
        Ok(self.draft.insert(draft))
    }

    /// Close the editor without saving, returning the discarded draft.
    pub fn close(&mut self) -> Option<StoryDraft> {
        let draft = self.draft.take();
        if draft.is_some() {
            debug!("Story editor closed without saving");
        }
        draft
    }

    pub fn draft(&self) -> Result<&StoryDraft> {
        self.draft.as_ref().ok_or(KokpitError::EditorClosed)
    }

    pub fn draft_mut(&mut self) -> Result<&mut StoryDraft> {
        self.draft.as_mut().ok_or(KokpitError::EditorClosed)
    }

    /// Save the open draft.
    ///
    /// Saving is allowed from any step. On success the editor closes and the
    /// completion event is returned; if the create/update call fails the
    /// editor stays open with its draft unchanged.
    pub async fn save(&mut self) -> Result<SaveCompleted> {
        let draft = self.draft.as_mut().ok_or(KokpitError::EditorClosed)?;
        let mode = draft.mode();
        let project_id = draft.target_project_id();

        let report = save_draft(&self.backend, draft).await?;

        self.draft = None;
        Ok(SaveCompleted {
            project_id,
            story_id: report.story_id,
            mode,
            report,
        })
    }
}
