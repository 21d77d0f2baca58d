//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can render it richly or print it as is.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

use super::FileSize;
use crate::models::{Attachment, Priority, Story, StoryStatus};

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Timestamp in the system time zone, e.g. `2024-03-01 10:30 CET`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M %Z")
        )
    }
}

impl fmt::Display for Story {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Story #{}", self.id)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status.label())?;
        writeln!(f, "- Priority: {}", self.priority.label())?;
        match self.story_points {
            Some(points) => writeln!(f, "- Story points: {points}")?,
            None => writeln!(f, "- Story points: -")?,
        }
        writeln!(f, "- Version: {}", self.version)?;
        if let Some(created) = &self.created_at {
            writeln!(f, "- Created: {}", LocalDateTime(created))?;
        }
        if let Some(updated) = &self.updated_at {
            writeln!(f, "- Updated: {}", LocalDateTime(updated))?;
        }

        writeln!(f)?;
        writeln!(f, "**As a** {}", self.as_a)?;
        writeln!(f, "**I want to** {}", self.i_want_to)?;
        writeln!(f, "**so that** {}", self.so_that)?;

        let criteria = self.criteria_lines();
        if !criteria.is_empty() {
            writeln!(f, "\n## Acceptance Criteria")?;
            writeln!(f)?;
            for criterion in criteria {
                writeln!(f, "- {criterion}")?;
            }
        }

        if let Some(notes) = self.notes.as_deref().filter(|notes| !notes.is_empty()) {
            writeln!(f, "\n## Notes")?;
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }

        Ok(())
    }
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.filename, FileSize(self.size))?;
        if self.is_image() {
            write!(f, " [image]")?;
        }
        Ok(())
    }
}
