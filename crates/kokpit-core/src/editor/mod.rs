//! Story editor: a three-step draft-and-save workflow for user stories.
//!
//! The editor is organized as a single-owner draft plus the routines that
//! act on it:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  EditorSession  │    │   StoryDraft    │    │  StoryBackend   │
//! │ (open, close,   │───▶│ (steps, fields, │───▶│ (create/update, │
//! │  save)          │    │  criteria, files│    │  uploads)       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     Page-facing          Transient state        Persistence
//! ```
//!
//! ## Submodules
//!
//! - [`draft`]: the [`StoryDraft`] state machine and its pending-file queue
//! - [`preview`]: read-only markdown projection of a draft
//! - [`save`]: the save protocol and sequential attachment uploads
//! - [`session`]: [`EditorSession`], which owns at most one open draft
//!
//! ## Save protocol
//!
//! 1. Build the payload from the draft; empty criteria are dropped and the
//!    rest joined with newlines.
//! 2. Create the story (no target id yet) or update it. A failure here stops
//!    the save and leaves the draft as it was.
//! 3. Upload each pending file in order, one at a time. A failed upload is
//!    reported with its file name and the remaining files are still sent.
//! 4. Close the editor and ask the caller to refresh the story's detail view.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use kokpit_core::{
//!     editor::EditorSession,
//!     params::OpenEditor,
//!     BackendBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = BackendBuilder::new().build()?;
//! let mut session = EditorSession::new(backend);
//!
//! let draft = session.open(&OpenEditor::create(7)).await?;
//! draft.set_as_a("customer");
//! draft.set_i_want_to("export invoices");
//! draft.set_so_that("reconcile accounts");
//! draft.next();
//! let index = draft.add_criterion();
//! draft.update_criterion(index, "When export clicked, a CSV downloads")?;
//!
//! let completed = session.save().await?;
//! println!("Saved story {}", completed.story_id);
//! # Ok(())
//! # }
//! ```

pub mod draft;
pub mod preview;
pub mod save;
pub mod session;


pub use draft::{EditorMode, FileContent, FileQueueReport, PendingFile, Step, StoryDraft, StoryFields};
pub use preview::StoryPreview;
pub use save::{save_draft, upload_all, SaveReport};
pub use session::{EditorSession, SaveCompleted};

/// Largest attachment accepted into the upload queue: 10 MiB.
pub const MAX_ATTACHMENT_SIZE: u64 = 10 * 1024 * 1024;
