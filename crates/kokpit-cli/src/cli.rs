//! Story commands: clap argument wrappers and their handlers.
//!
//! Argument structs stay on the CLI side and convert into the core's
//! parameter types with `From`, so the core never sees clap:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → EditorSession / StoryBackend
//! ```
//!
//! `new` and `edit` drive the same wizard a browser user would: the flags
//! fill the narrative, criteria and details steps, files are queued with the
//! usual size and duplicate checks, and the draft is saved through
//! [`EditorSession`]. Afterwards the detail view of the saved story is shown.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use kokpit_core::{
    display::Attachments,
    editor::FileQueueReport,
    params::{Id, ListStories, OpenEditor},
    EditorSession, Notice, PendingFile, Priority, Stories, StoryBackend, StoryDetail,
    StoryDraft, StoryPreview, StoryStatus,
};
use log::debug;

use crate::renderer::TerminalRenderer;

// ============================================================================
// CLI Argument Wrappers
// ============================================================================

/// Story content shared by `new`, `edit` and `preview`
///
/// Every flag is optional. When editing, only the flags given replace the
/// stored values.
#[derive(Args, Default)]
pub struct StoryInputArgs {
    /// Type of user the story is for
    #[arg(long)]
    pub as_a: Option<String>,
    /// Action or feature the user wants
    #[arg(long)]
    pub i_want_to: Option<String>,
    /// Benefit or value the user gets
    #[arg(long)]
    pub so_that: Option<String>,
    /// Acceptance criterion; repeat for several
    #[arg(short = 'c', long = "criterion", help = "Acceptance criterion (repeatable)")]
    pub criteria: Vec<String>,
    #[arg(short, long, help = "Priority of the story")]
    pub priority: Option<PriorityArg>,
    /// Estimate in story points
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub points: Option<u32>,
    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
    /// File to attach after saving; repeat for several (max 10 MB each)
    #[arg(short = 'f', long = "attach")]
    pub attachments: Vec<PathBuf>,
}

/// Create a new story in a project
#[derive(Args)]
pub struct NewStoryArgs {
    #[arg(help = "Project the story belongs to")]
    pub project_id: u64,
    #[command(flatten)]
    pub input: StoryInputArgs,
}

impl From<&NewStoryArgs> for OpenEditor {
    fn from(val: &NewStoryArgs) -> Self {
        OpenEditor::create(val.project_id)
    }
}

/// Edit an existing story
///
/// The story is loaded first, then the given flags are applied on top of the
/// stored values. New criteria are appended unless --clear-criteria is set.
#[derive(Args)]
pub struct EditStoryArgs {
    #[arg(help = "Project the story belongs to")]
    pub project_id: u64,
    #[arg(help = "Unique identifier of the story to edit")]
    pub story_id: u64,
    /// Drop the stored acceptance criteria before adding new ones
    #[arg(long)]
    pub clear_criteria: bool,
    #[command(flatten)]
    pub input: StoryInputArgs,
}

impl From<&EditStoryArgs> for OpenEditor {
    fn from(val: &EditStoryArgs) -> Self {
        OpenEditor::edit(val.project_id, val.story_id)
    }
}

/// Render a story preview without contacting the backend
#[derive(Args)]
pub struct PreviewStoryArgs {
    #[command(flatten)]
    pub input: StoryInputArgs,
}

/// Show a story with its attachments
#[derive(Args)]
pub struct ShowStoryArgs {
    #[arg(help = "Unique identifier of the story to show")]
    pub id: u64,
}

impl From<ShowStoryArgs> for Id {
    fn from(val: ShowStoryArgs) -> Self {
        Id { id: val.id }
    }
}

/// List the stories of a project
#[derive(Args)]
pub struct ListStoriesArgs {
    #[arg(help = "Project whose stories to list")]
    pub project_id: u64,
    #[arg(short, long, help = "Only show stories in this status")]
    pub status: Option<StatusArg>,
}

impl From<ListStoriesArgs> for ListStories {
    fn from(val: ListStoriesArgs) -> Self {
        ListStories {
            project_id: val.project_id,
            status: val.status.map(StoryStatus::from),
        }
    }
}

#[derive(Subcommand)]
pub enum StoryCommands {
    /// Create a new story
    #[command(aliases = ["n", "create"])]
    New(NewStoryArgs),
    /// Edit an existing story
    #[command(alias = "e")]
    Edit(EditStoryArgs),
    /// Preview a story offline
    #[command(alias = "p")]
    Preview(PreviewStoryArgs),
    /// Show a story with its attachments
    #[command(alias = "s")]
    Show(ShowStoryArgs),
    /// List the stories of a project
    #[command(aliases = ["l", "ls"])]
    List(ListStoriesArgs),
}

/// Command-line representation of story priorities
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
    Critical,
}

impl From<PriorityArg> for Priority {
    fn from(val: PriorityArg) -> Self {
        match val {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
            PriorityArg::Critical => Priority::Critical,
        }
    }
}

/// Command-line representation of story statuses
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Draft,
    PendingReview,
    Approved,
    InProgress,
    Testing,
    Done,
    Rejected,
}

impl From<StatusArg> for StoryStatus {
    fn from(val: StatusArg) -> Self {
        match val {
            StatusArg::Draft => StoryStatus::Draft,
            StatusArg::PendingReview => StoryStatus::PendingReview,
            StatusArg::Approved => StoryStatus::Approved,
            StatusArg::InProgress => StoryStatus::InProgress,
            StatusArg::Testing => StoryStatus::Testing,
            StatusArg::Done => StoryStatus::Done,
            StatusArg::Rejected => StoryStatus::Rejected,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs story commands against a backend and renders the results.
pub struct Cli<B> {
    session: EditorSession<B>,
    renderer: TerminalRenderer,
}

impl<B: StoryBackend> Cli<B> {
    pub fn new(backend: B, renderer: TerminalRenderer) -> Self {
        Self {
            session: EditorSession::new(backend),
            renderer,
        }
    }

    pub async fn handle_story_command(mut self, command: StoryCommands) -> Result<()> {
        match command {
            StoryCommands::New(args) => {
                let params = OpenEditor::from(&args);
                self.run_editor(&params, args.input, false).await
            }
            StoryCommands::Edit(args) => {
                let params = OpenEditor::from(&args);
                self.run_editor(&params, args.input, args.clear_criteria)
                    .await
            }
            StoryCommands::Preview(args) => self.preview(args.input),
            StoryCommands::Show(args) => self.show_story(&args.into()).await,
            StoryCommands::List(args) => self.list_stories(&args.into()).await,
        }
    }

    /// Open the editor, fill it from the flags, save and show the result.
    ///
    /// Attachments are screened before the editor is opened, so an oversized
    /// file is reported without touching the backend.
    async fn run_editor(
        &mut self,
        params: &OpenEditor,
        mut input: StoryInputArgs,
        clear_criteria: bool,
    ) -> Result<()> {
        let (files, notices) = screen_attachments(std::mem::take(&mut input.attachments));
        for notice in &notices {
            self.renderer.render_notice(notice);
        }

        let draft = self
            .session
            .open(params)
            .await
            .with_context(|| match params.story_id {
                Some(id) => format!("Failed to load story {id}"),
                None => "Failed to open story editor".to_string(),
            })?;

        if clear_criteria {
            while !draft.acceptance_criteria().is_empty() {
                draft.remove_criterion(0)?;
            }
        }
        let notices = fill_draft(draft, input, files)?;
        for notice in &notices {
            self.renderer.render_notice(notice);
        }

        let completed = match self.session.save().await {
            Ok(completed) => completed,
            // The notice already carries the server's message
            Err(err) if err.is_rejection() => {
                self.renderer
                    .render_notice(&Notice::failure(err.user_message()));
                bail!("Story was not saved");
            }
            Err(err) => return Err(err).context("Story was not saved"),
        };
        for notice in &completed.report.notices {
            self.renderer.render_notice(notice);
        }
        if completed.report.is_partial() {
            self.renderer.render_notice(&Notice::failure(
                "Story saved, but some attachments were not uploaded",
            ));
        }

        self.show_story(&Id {
            id: completed.story_id,
        })
        .await
    }

    fn preview(&self, mut input: StoryInputArgs) -> Result<()> {
        let (files, mut notices) = screen_attachments(std::mem::take(&mut input.attachments));
        let mut draft = StoryDraft::new(0);
        notices.extend(fill_draft(&mut draft, input, files)?);
        for notice in &notices {
            self.renderer.render_notice(notice);
        }

        self.renderer.render(&StoryPreview(&draft).to_string())?;
        if !draft.pending_files().is_empty() {
            let names: Vec<&str> = draft
                .pending_files()
                .iter()
                .map(|file| file.name.as_str())
                .collect();
            self.renderer
                .render(&format!("\nAttachments: {}\n", names.join(", ")))?;
        }
        Ok(())
    }

    async fn show_story(&self, params: &Id) -> Result<()> {
        let backend = self.session.backend();
        let story = backend
            .get_story(params.id)
            .await
            .with_context(|| format!("Failed to load story {}", params.id))?;
        let attachments = backend
            .list_attachments(params.id)
            .await
            .with_context(|| format!("Failed to load attachments of story {}", params.id))?;

        let detail = StoryDetail {
            story,
            attachments: Attachments(attachments),
        };
        self.renderer.render(&detail.to_string())
    }

    async fn list_stories(&self, params: &ListStories) -> Result<()> {
        let stories = self
            .session
            .backend()
            .list_stories(params.project_id, params.status)
            .await
            .with_context(|| format!("Failed to list stories of project {}", params.project_id))?;

        self.renderer.render(&Stories(stories).to_string())
    }
}

/// Read the metadata of each attachment path and drop files over the size
/// limit. Touches only the local filesystem.
fn screen_attachments(paths: Vec<PathBuf>) -> (Vec<PendingFile>, Vec<Notice>) {
    let mut files = Vec::with_capacity(paths.len());
    let mut notices = Vec::new();
    let mut oversized = FileQueueReport::default();
    for path in paths {
        match PendingFile::from_path(&path) {
            Ok(file) => match file.check_size() {
                Ok(()) => files.push(file),
                Err(err) => oversized.rejected.push(err),
            },
            Err(err) => notices.push(Notice::failure(err.to_string())),
        }
    }
    notices.extend(oversized.notices());
    (files, notices)
}

/// Walk the wizard steps, applying the flags that belong to each, then queue
/// the screened files. Returns notices for files that could not be queued.
fn fill_draft(
    draft: &mut StoryDraft,
    input: StoryInputArgs,
    files: Vec<PendingFile>,
) -> Result<Vec<Notice>> {
    let StoryInputArgs {
        as_a,
        i_want_to,
        so_that,
        criteria,
        priority,
        points,
        notes,
        ..
    } = input;

    // Narrative
    if let Some(as_a) = as_a {
        draft.set_as_a(as_a);
    }
    if let Some(i_want_to) = i_want_to {
        draft.set_i_want_to(i_want_to);
    }
    if let Some(so_that) = so_that {
        draft.set_so_that(so_that);
    }

    draft.next();
    for criterion in criteria {
        let index = draft.add_criterion();
        draft.update_criterion(index, criterion)?;
    }

    draft.next();
    if let Some(priority) = priority {
        draft.set_priority(priority.into());
    }
    if points.is_some() {
        draft.set_story_points(points)?;
    }
    if let Some(notes) = notes {
        draft.set_notes(notes);
    }

    let notices = draft.add_pending_files(files).notices();

    debug!(
        "Draft filled up to step {} ({} criteria, {} files)",
        draft.current_step().number(),
        draft.acceptance_criteria().len(),
        draft.pending_files().len()
    );
    Ok(notices)
}
