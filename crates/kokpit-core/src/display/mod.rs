//! Display formatting and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! newtype wrappers cover collections and operation outcomes. Everything is
//! rendered as markdown, which the CLI either styles or prints verbatim.
//!
//! ## Module Organization
//!
//! - [`collections`]: collection wrappers ([`Stories`], [`Attachments`])
//! - [`results`]: outcome wrappers ([`StoryDetail`])
//! - [`status`]: user-facing notices ([`Notice`])
//! - [`filesize`]: byte counts ([`FileSize`])
//! - [`models`]: Display implementations for domain models
//!
//! ```rust
//! use kokpit_core::display::{FileSize, Notice};
//!
//! assert_eq!(FileSize(2048).to_string(), "2.0 KB");
//! assert_eq!(Notice::success("Story updated").to_string(), "Success: Story updated\n");
//! ```

pub mod collections;
pub mod filesize;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Attachments, Stories};
pub use filesize::FileSize;
pub use models::LocalDateTime;
pub use results::StoryDetail;
pub use status::{Notice, NoticeLevel};
