//! The editor's in-memory working copy of a story.

use std::{
    ops::RangeInclusive,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use super::MAX_ATTACHMENT_SIZE;
use crate::{
    error::{KokpitError, Result},
    models::{Priority, Story, StoryPayload},
};

/// Whether the editor creates a new story or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit,
}

/// The three wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    /// As a / I want to / so that
    Narrative = 1,
    /// Acceptance criteria list
    Criteria = 2,
    /// Priority, points, notes and attachments
    Details = 3,
}

impl Step {
    pub const FIRST: Step = Step::Narrative;
    pub const LAST: Step = Step::Details;

    /// 1-based position of the step.
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Step> {
        match number {
            1 => Some(Step::Narrative),
            2 => Some(Step::Criteria),
            3 => Some(Step::Details),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    pub fn prev(self) -> Option<Step> {
        self.number().checked_sub(1).and_then(Step::from_number)
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::Narrative => "Story",
            Step::Criteria => "Criteria",
            Step::Details => "Details",
        }
    }
}

/// Editable scalar fields of a story.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryFields {
    pub as_a: String,
    pub i_want_to: String,
    pub so_that: String,
    pub priority: Priority,
    /// 1 to 100 when set
    pub story_points: Option<u32>,
    pub notes: String,
}

impl StoryFields {
    fn from_story(story: &Story) -> Self {
        Self {
            as_a: story.as_a.clone(),
            i_want_to: story.i_want_to.clone(),
            so_that: story.so_that.clone(),
            priority: story.priority,
            // Stored estimates outside the accepted range are treated as unset
            story_points: story.story_points.filter(|points| POINTS_RANGE.contains(points)),
            notes: story.notes.clone().unwrap_or_default(),
        }
    }
}

/// Where the bytes of a pending file come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Already in memory
    Bytes(Vec<u8>),
    /// Read from disk when the upload happens
    Path(PathBuf),
}

impl FileContent {
    /// Load the full content.
    pub async fn load(&self) -> Result<Vec<u8>> {
        match self {
            FileContent::Bytes(bytes) => Ok(bytes.clone()),
            FileContent::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|e| KokpitError::FileSystem {
                        path: path.clone(),
                        source: e,
                    })
            }
        }
    }
}

/// A file selected for upload but not yet sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    pub size_bytes: u64,
    pub content: FileContent,
}

impl PendingFile {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size_bytes: bytes.len() as u64,
            content: FileContent::Bytes(bytes),
        }
    }

    /// Reference a file on disk. Only metadata is read here; the content is
    /// loaded at upload time.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| KokpitError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        if !metadata.is_file() {
            return Err(KokpitError::invalid_input("attachment")
                .with_reason(format!("'{}' is not a regular file", path.display())));
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                KokpitError::invalid_input("attachment")
                    .with_reason(format!("'{}' has no file name", path.display()))
            })?;

        Ok(Self {
            name,
            size_bytes: metadata.len(),
            content: FileContent::Path(path.to_path_buf()),
        })
    }

    /// Fails with [`KokpitError::SizeLimitExceeded`] when the file is over
    /// [`MAX_ATTACHMENT_SIZE`].
    pub fn check_size(&self) -> Result<()> {
        if self.size_bytes > MAX_ATTACHMENT_SIZE {
            return Err(KokpitError::SizeLimitExceeded {
                name: self.name.clone(),
                size: self.size_bytes,
                limit: MAX_ATTACHMENT_SIZE,
            });
        }
        Ok(())
    }

    fn same_file(&self, other: &PendingFile) -> bool {
        self.name == other.name && self.size_bytes == other.size_bytes
    }
}

/// What happened to a batch of files offered to the queue.
#[derive(Debug, Default)]
pub struct FileQueueReport {
    /// Names of files appended to the queue
    pub added: Vec<String>,
    /// Names of files skipped because an identical entry was already queued
    pub duplicates: Vec<String>,
    /// One [`KokpitError::SizeLimitExceeded`] per oversized file
    pub rejected: Vec<KokpitError>,
}

/// Working copy of a story being created or edited.
///
/// A draft is owned by exactly one editor and is dropped when the editor
/// closes. All mutation goes through the methods below, which keep the step
/// within 1..=3 and the file queue free of oversized or duplicate entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDraft {
    mode: EditorMode,
    target_project_id: u64,
    target_story_id: Option<u64>,
    current_step: Step,
    fields: StoryFields,
    acceptance_criteria: Vec<String>,
    pending_files: Vec<PendingFile>,
}

impl StoryDraft {
    /// Fresh draft for a new story in `project_id`.
    pub fn new(project_id: u64) -> Self {
        Self {
            mode: EditorMode::Create,
            target_project_id: project_id,
            target_story_id: None,
            current_step: Step::FIRST,
            fields: StoryFields::default(),
            acceptance_criteria: Vec::new(),
            pending_files: Vec::new(),
        }
    }

    /// Draft populated from a persisted story.
    pub fn from_story(project_id: u64, story: &Story) -> Self {
        Self {
            mode: EditorMode::Edit,
            target_project_id: project_id,
            target_story_id: Some(story.id),
            current_step: Step::FIRST,
            fields: StoryFields::from_story(story),
            acceptance_criteria: story.criteria_lines(),
            pending_files: Vec::new(),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn target_project_id(&self) -> u64 {
        self.target_project_id
    }

    /// Persisted story id; unset until the first successful create.
    pub fn target_story_id(&self) -> Option<u64> {
        self.target_story_id
    }

    pub fn current_step(&self) -> Step {
        self.current_step
    }

    pub fn fields(&self) -> &StoryFields {
        &self.fields
    }

    pub fn acceptance_criteria(&self) -> &[String] {
        &self.acceptance_criteria
    }

    pub fn pending_files(&self) -> &[PendingFile] {
        &self.pending_files
    }

    // Steps

    /// Jump directly to a step, as when clicking a step indicator.
    pub fn go_to_step(&mut self, number: u8) -> Result<Step> {
        let step = Step::from_number(number).ok_or_else(|| {
            KokpitError::invalid_input("step").with_reason(format!("{number} is not between 1 and 3"))
        })?;
        debug!("Story editor jumps to step {}", step.number());
        self.current_step = step;
        Ok(step)
    }

    /// Advance one step; no-op on the last step.
    ///
    /// Field setters write straight into the draft, so moving between steps
    /// never has inputs left to copy.
    pub fn next(&mut self) -> Step {
        if let Some(step) = self.current_step.next() {
            self.current_step = step;
        }
        self.current_step
    }

    /// Go back one step; no-op on the first step.
    pub fn prev(&mut self) -> Step {
        if let Some(step) = self.current_step.prev() {
            self.current_step = step;
        }
        self.current_step
    }

    // Fields

    pub fn set_as_a(&mut self, value: impl Into<String>) {
        self.fields.as_a = value.into();
    }

    pub fn set_i_want_to(&mut self, value: impl Into<String>) {
        self.fields.i_want_to = value.into();
    }

    pub fn set_so_that(&mut self, value: impl Into<String>) {
        self.fields.so_that = value.into();
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.fields.priority = priority;
    }

    /// Set or clear the estimate. Values outside 1..=100 are rejected.
    pub fn set_story_points(&mut self, points: Option<u32>) -> Result<()> {
        if let Some(points) = points {
            validate_story_points(points)?;
        }
        self.fields.story_points = points;
        Ok(())
    }

    pub fn set_notes(&mut self, value: impl Into<String>) {
        self.fields.notes = value.into();
    }

    /// Replace all scalar fields at once.
    pub fn set_fields(&mut self, fields: StoryFields) -> Result<()> {
        if let Some(points) = fields.story_points {
            validate_story_points(points)?;
        }
        self.fields = fields;
        Ok(())
    }

    // Acceptance criteria

    /// Append an empty criterion and return its index.
    pub fn add_criterion(&mut self) -> usize {
        self.acceptance_criteria.push(String::new());
        self.acceptance_criteria.len() - 1
    }

    /// Overwrite the criterion at `index`.
    pub fn update_criterion(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let len = self.acceptance_criteria.len();
        let slot = self
            .acceptance_criteria
            .get_mut(index)
            .ok_or_else(|| criterion_out_of_range(index, len))?;
        *slot = value.into();
        Ok(())
    }

    /// Remove the criterion at `index`, shifting later entries left.
    pub fn remove_criterion(&mut self, index: usize) -> Result<String> {
        if index >= self.acceptance_criteria.len() {
            return Err(criterion_out_of_range(index, self.acceptance_criteria.len()));
        }
        Ok(self.acceptance_criteria.remove(index))
    }

    /// Criteria with empty entries dropped, in order.
    pub fn filled_criteria(&self) -> impl Iterator<Item = &str> {
        self.acceptance_criteria
            .iter()
            .map(String::as_str)
            .filter(|criterion| !criterion.is_empty())
    }

    // Pending files

    /// Offer files to the upload queue.
    ///
    /// Oversized files are rejected and reported; files matching a queued
    /// entry by name and size are skipped.
    pub fn add_pending_files<I>(&mut self, files: I) -> FileQueueReport
    where
        I: IntoIterator<Item = PendingFile>,
    {
        let mut report = FileQueueReport::default();
        for file in files {
            if let Err(err) = file.check_size() {
                warn!("Rejected {} ({} bytes): over the attachment size limit", file.name, file.size_bytes);
                report.rejected.push(err);
                continue;
            }
            if self.pending_files.iter().any(|queued| queued.same_file(&file)) {
                report.duplicates.push(file.name);
                continue;
            }
            report.added.push(file.name.clone());
            self.pending_files.push(file);
        }
        report
    }

    /// Drop a queued file.
    pub fn remove_pending_file(&mut self, index: usize) -> Result<PendingFile> {
        if index >= self.pending_files.len() {
            return Err(KokpitError::invalid_input("pending_file").with_reason(format!(
                "index {index} is out of range for {} queued files",
                self.pending_files.len()
            )));
        }
        Ok(self.pending_files.remove(index))
    }

    // Save support

    /// Request body for the current state of the draft.
    pub fn payload(&self) -> StoryPayload {
        StoryPayload {
            as_a: self.fields.as_a.clone(),
            i_want_to: self.fields.i_want_to.clone(),
            so_that: self.fields.so_that.clone(),
            acceptance_criteria: self.filled_criteria().collect::<Vec<_>>().join("\n"),
            priority: self.fields.priority,
            notes: self.fields.notes.clone(),
            story_points: self.fields.story_points,
        }
    }

    pub(crate) fn set_target_story_id(&mut self, story_id: u64) {
        self.target_story_id = Some(story_id);
    }
}

const POINTS_RANGE: RangeInclusive<u32> = 1..=100;

fn validate_story_points(points: u32) -> Result<()> {
    if POINTS_RANGE.contains(&points) {
        Ok(())
    } else {
        Err(KokpitError::invalid_input("story_points")
            .with_reason(format!("{points} is not between 1 and 100")))
    }
}

fn criterion_out_of_range(index: usize, len: usize) -> KokpitError {
    KokpitError::invalid_input("acceptance_criteria")
        .with_reason(format!("index {index} is out of range for {len} criteria"))
}
