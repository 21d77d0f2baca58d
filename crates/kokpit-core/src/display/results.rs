//! Wrapper types for displaying operation outcomes.

use std::fmt;

use super::{collections::Attachments, Notice};
use crate::{
    editor::FileQueueReport,
    error::KokpitError,
    models::Story,
};

/// A story together with its attachments, as shown on the detail view.
pub struct StoryDetail {
    pub story: Story,
    pub attachments: Attachments,
}

impl fmt::Display for StoryDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.story)?;
        writeln!(f, "\n## Attachments")?;
        writeln!(f)?;
        write!(f, "{}", self.attachments)
    }
}

impl FileQueueReport {
    /// Notices for files that could not be queued. Duplicates are skipped
    /// silently.
    pub fn notices(&self) -> Vec<Notice> {
        self.rejected
            .iter()
            .map(|err| match err {
                KokpitError::SizeLimitExceeded { name, .. } => {
                    Notice::failure(format!("File {name} is too large (max 10 MB)"))
                }
                other => Notice::failure(other.to_string()),
            })
            .collect()
    }
}
