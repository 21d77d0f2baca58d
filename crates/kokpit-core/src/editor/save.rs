//! Two-phase save: persist the story record, then upload queued files.

use log::{info, warn};

use super::draft::{PendingFile, StoryDraft};
use crate::{
    backend::StoryBackend,
    display::Notice,
    error::{Result, UploadError},
    models::{Attachment, Story},
};

/// Outcome of a save whose create/update call succeeded.
#[derive(Debug)]
pub struct SaveReport {
    /// Record returned by the create or update call
    pub story: Story,
    /// Id every upload was sent to
    pub story_id: u64,
    /// Whether the record was created rather than updated
    pub created: bool,
    /// One entry per queued file, in queue order
    pub uploads: Vec<std::result::Result<Attachment, UploadError>>,
    /// Messages for the user, in the order they were produced
    pub notices: Vec<Notice>,
}

impl SaveReport {
    pub fn uploaded(&self) -> impl Iterator<Item = &Attachment> {
        self.uploads.iter().filter_map(|result| result.as_ref().ok())
    }

    pub fn failed_uploads(&self) -> impl Iterator<Item = &UploadError> {
        self.uploads.iter().filter_map(|result| result.as_ref().err())
    }

    /// True when some, but not all, uploads failed.
    pub fn is_partial(&self) -> bool {
        let failed = self.failed_uploads().count();
        failed > 0 && failed < self.uploads.len()
    }
}

/// Persist a draft and upload its pending files.
///
/// Without a target story id the story is created in the draft's project and
/// the new id is stored on the draft; otherwise the existing story is
/// updated. If that call fails the error is returned, the draft is left
/// untouched and no upload is attempted. Upload failures never fail the save;
/// they are reported per file in [`SaveReport::uploads`].
pub async fn save_draft<B>(backend: &B, draft: &mut StoryDraft) -> Result<SaveReport>
where
    B: StoryBackend + ?Sized,
{
    let payload = draft.payload();

    let (story, created) = match draft.target_story_id() {
        Some(story_id) => {
            let story = backend.update_story(story_id, &payload).await?;
            info!("Updated story {story_id}");
            (story, false)
        }
        None => {
            let project_id = draft.target_project_id();
            let story = backend.create_story(project_id, &payload).await?;
            info!("Created story {} in project {project_id}", story.id);
            draft.set_target_story_id(story.id);
            (story, true)
        }
    };
    let story_id = draft.target_story_id().unwrap_or(story.id);

    let mut notices = vec![Notice::success(if created {
        "Story created"
    } else {
        "Story updated"
    })];

    let uploads = upload_all(backend, story_id, draft.pending_files()).await;
    notices.extend(
        uploads
            .iter()
            .filter_map(|result| result.as_ref().err())
            .map(|err| Notice::failure(err.to_string())),
    );
    let uploaded = uploads.iter().filter(|result| result.is_ok()).count();
    if uploaded > 0 {
        notices.push(Notice::success(format!("{uploaded} attachment(s) uploaded")));
    }

    Ok(SaveReport {
        story,
        story_id,
        created,
        uploads,
        notices,
    })
}

/// Upload files one after another, collecting a result per file.
///
/// Each upload starts only after the previous one has settled. A failure is
/// recorded and the remaining files are still attempted.
pub async fn upload_all<B>(
    backend: &B,
    story_id: u64,
    files: &[PendingFile],
) -> Vec<std::result::Result<Attachment, UploadError>>
where
    B: StoryBackend + ?Sized,
{
    let mut results = Vec::with_capacity(files.len());
    for file in files {
        let result = upload_one(backend, story_id, file).await;
        match &result {
            Ok(attachment) => info!("Uploaded {} as attachment {}", file.name, attachment.id),
            Err(err) => warn!("Upload of {} failed: {}", file.name, err.source),
        }
        results.push(result);
    }
    results
}

async fn upload_one<B>(
    backend: &B,
    story_id: u64,
    file: &PendingFile,
) -> std::result::Result<Attachment, UploadError>
where
    B: StoryBackend + ?Sized,
{
    let content = file
        .content
        .load()
        .await
        .map_err(|e| UploadError::new(&file.name, e))?;
    backend
        .upload_attachment(story_id, content, &file.name)
        .await
        .map_err(|e| UploadError::new(&file.name, e))
}
