//! Data models for stories and their attachments.
//!
//! These are the records exchanged with the backend. Display implementations
//! live in [`crate::display::models`] so presentation stays separate from the
//! data structures.
//!
//! # Examples
//!
//! ```rust
//! use kokpit_core::models::{Priority, Story, StoryStatus};
//!
//! let story: Story = serde_json::from_str(
//!     r#"{
//!         "id": 12,
//!         "project_id": 7,
//!         "as_a": "customer",
//!         "i_want_to": "export invoices",
//!         "so_that": "reconcile accounts",
//!         "acceptance_criteria": "CSV downloads\n\nTotals match",
//!         "priority": "high",
//!         "status": "pending_review",
//!         "version": 3
//!     }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(story.priority, Priority::High);
//! assert_eq!(story.status, StoryStatus::PendingReview);
//! assert_eq!(story.criteria_lines(), vec!["CSV downloads", "Totals match"]);
//! ```

pub mod attachment;
pub mod payload;
pub mod status;
pub mod story;


pub use attachment::{is_image_file, Attachment};
pub use payload::StoryPayload;
pub use status::{Priority, StoryStatus};
pub use story::Story;
