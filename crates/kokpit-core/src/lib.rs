//! Core library for the kokpit story editor.
//!
//! This crate holds everything needed to create and edit user stories against
//! the kokpit dashboard backend: data models, the REST client, the editor's
//! draft state machine and save protocol, and markdown display helpers.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kokpit_core::{params::OpenEditor, BackendBuilder, EditorSession, PendingFile};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = BackendBuilder::new()
//!     .with_base_url(Some("http://localhost:8000/api"))
//!     .build()?;
//! let mut session = EditorSession::new(backend);
//!
//! let draft = session.open(&OpenEditor::edit(7, 42)).await?;
//! draft.set_notes("Split into two stories after review");
//! let report = draft.add_pending_files([PendingFile::from_path("mockup.png")?]);
//! for notice in report.notices() {
//!     eprint!("{notice}");
//! }
//!
//! let completed = session.save().await?;
//! for notice in &completed.report.notices {
//!     print!("{notice}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod display;
pub mod editor;
pub mod error;
pub mod models;
pub mod params;

// Re-export commonly used types
pub use backend::{HttpBackend, StoryBackend};
pub use config::{BackendBuilder, BackendConfig};
pub use display::{Notice, NoticeLevel, Stories, StoryDetail};
pub use editor::{
    EditorMode, EditorSession, PendingFile, SaveCompleted, SaveReport, Step, StoryDraft,
    StoryPreview, MAX_ATTACHMENT_SIZE,
};
pub use error::{KokpitError, Result, UploadError};
pub use models::{Attachment, Priority, Story, StoryPayload, StoryStatus};
pub use params::{Id, ListStories, OpenEditor};
