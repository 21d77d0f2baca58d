//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::models::{Attachment, Story};

/// Newtype wrapper for displaying a list of stories, one line each.
///
/// # Examples
///
/// ```rust
/// use kokpit_core::{display::Stories, models::Story};
///
/// let story: Story = serde_json::from_str(
///     r#"{"id": 4, "as_a": "admin", "i_want_to": "invite users", "so_that": "the team can join"}"#,
/// )
/// .unwrap();
///
/// let output = Stories(vec![story]).to_string();
/// assert!(output.contains("#4"));
/// assert!(output.contains("invite users"));
/// ```
pub struct Stories(pub Vec<Story>);

impl Stories {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Stories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No stories found.");
        }

        for story in &self.0 {
            writeln!(
                f,
                "- **#{}** `{}` `{}` As a {}, I want to {}, so that {}",
                story.id,
                story.status.label(),
                story.priority.label(),
                story.as_a,
                story.i_want_to,
                story.so_that
            )?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a story's attachments.
pub struct Attachments(pub Vec<Attachment>);

impl Attachments {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Attachments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No attachments.");
        }
        for attachment in &self.0 {
            writeln!(f, "- {attachment}")?;
        }
        Ok(())
    }
}
