//! Access to the dashboard's REST backend.
//!
//! The editor talks to the backend only through [`StoryBackend`], so the save
//! protocol can run against the real HTTP client ([`HttpBackend`]) or any
//! other implementation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{Attachment, Story, StoryPayload, StoryStatus},
};

pub mod http;

pub use http::HttpBackend;

/// Story-related operations offered by the backend.
#[async_trait]
pub trait StoryBackend: Send + Sync {
    /// Fetch a single story.
    async fn get_story(&self, story_id: u64) -> Result<Story>;

    /// List the stories of a project, optionally filtered by status.
    async fn list_stories(&self, project_id: u64, status: Option<StoryStatus>)
        -> Result<Vec<Story>>;

    /// Create a story in a project and return the persisted record.
    async fn create_story(&self, project_id: u64, payload: &StoryPayload) -> Result<Story>;

    /// Replace the editable fields of an existing story.
    async fn update_story(&self, story_id: u64, payload: &StoryPayload) -> Result<Story>;

    /// Attach a file to a story.
    async fn upload_attachment(
        &self,
        story_id: u64,
        content: Vec<u8>,
        file_name: &str,
    ) -> Result<Attachment>;

    /// List a story's attachments.
    async fn list_attachments(&self, story_id: u64) -> Result<Vec<Attachment>>;
}

#[async_trait]
impl<T> StoryBackend for Arc<T>
where
    T: StoryBackend + ?Sized,
{
    async fn get_story(&self, story_id: u64) -> Result<Story> {
        (**self).get_story(story_id).await
    }

    async fn list_stories(
        &self,
        project_id: u64,
        status: Option<StoryStatus>,
    ) -> Result<Vec<Story>> {
        (**self).list_stories(project_id, status).await
    }

    async fn create_story(&self, project_id: u64, payload: &StoryPayload) -> Result<Story> {
        (**self).create_story(project_id, payload).await
    }

    async fn update_story(&self, story_id: u64, payload: &StoryPayload) -> Result<Story> {
        (**self).update_story(story_id, payload).await
    }

    async fn upload_attachment(
        &self,
        story_id: u64,
        content: Vec<u8>,
        file_name: &str,
    ) -> Result<Attachment> {
        (**self).upload_attachment(story_id, content, file_name).await
    }

    async fn list_attachments(&self, story_id: u64) -> Result<Vec<Attachment>> {
        (**self).list_attachments(story_id).await
    }
}
