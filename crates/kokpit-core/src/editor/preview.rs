//! Read-only preview of a draft.
//!
//! The preview is recomputed from the draft on every render and never feeds
//! back into it. Missing narrative fields show placeholder hints; this is
//! purely cosmetic and does not block saving.

use std::fmt;

use super::draft::StoryDraft;

pub const AS_A_PLACEHOLDER: &str = "type of user";
pub const I_WANT_TO_PLACEHOLDER: &str = "action or feature";
pub const SO_THAT_PLACEHOLDER: &str = "benefit or value";

/// Markdown projection of a [`StoryDraft`].
///
/// # Examples
///
/// ```rust
/// use kokpit_core::editor::{StoryDraft, StoryPreview};
///
/// let mut draft = StoryDraft::new(7);
/// draft.set_as_a("customer");
/// let index = draft.add_criterion();
/// draft.update_criterion(index, "A CSV downloads").unwrap();
///
/// let preview = StoryPreview(&draft).to_string();
/// assert!(preview.contains("**As a** customer"));
/// assert!(preview.contains("_action or feature_"));
/// assert!(preview.contains("- A CSV downloads"));
/// ```
pub struct StoryPreview<'a>(pub &'a StoryDraft);

impl fmt::Display for StoryPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.0.fields();

        write_line(f, "As a", &fields.as_a, AS_A_PLACEHOLDER)?;
        write_line(f, "I want to", &fields.i_want_to, I_WANT_TO_PLACEHOLDER)?;
        write_line(f, "so that", &fields.so_that, SO_THAT_PLACEHOLDER)?;

        let criteria: Vec<&str> = self.0.filled_criteria().collect();
        if !criteria.is_empty() {
            writeln!(f)?;
            writeln!(f, "**Criteria**")?;
            for criterion in criteria {
                writeln!(f, "- {criterion}")?;
            }
        }

        writeln!(f)?;
        write!(f, "`{}`", fields.priority.label())?;
        if let Some(points) = fields.story_points {
            write!(f, " `{points} SP`")?;
        }
        writeln!(f)
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, label: &str, value: &str, placeholder: &str) -> fmt::Result {
    if value.is_empty() {
        writeln!(f, "**{label}** _{placeholder}_")
    } else {
        writeln!(f, "**{label}** {value}")
    }
}
