#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicU64, AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use kokpit_core::{
    Attachment, KokpitError, Priority, Result, Story, StoryBackend, StoryPayload, StoryStatus,
};

pub mod stub_server;

pub use stub_server::{RecordedRequest, StubServer};

/// A backend call as observed by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetStory(u64),
    ListStories(u64, Option<StoryStatus>),
    Create(u64, StoryPayload),
    Update(u64, StoryPayload),
    Upload { story_id: u64, file_name: String, size: usize },
    ListAttachments(u64),
}

/// In-memory backend that records every call.
pub struct RecordingBackend {
    calls: Mutex<Vec<Call>>,
    stories: Mutex<HashMap<u64, Story>>,
    next_id: AtomicU64,
    reject_saves_with: Option<String>,
    failing_uploads: HashSet<String>,
    uploads_in_flight: AtomicUsize,
    max_uploads_in_flight: AtomicUsize,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            stories: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(100),
            reject_saves_with: None,
            failing_uploads: HashSet::new(),
            uploads_in_flight: AtomicUsize::new(0),
            max_uploads_in_flight: AtomicUsize::new(0),
        }
    }
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a persisted story.
    pub fn with_story(self, story: Story) -> Self {
        self.stories.lock().unwrap().insert(story.id, story);
        self
    }

    /// Make every create/update fail with a validation error.
    pub fn rejecting_saves(mut self, message: &str) -> Self {
        self.reject_saves_with = Some(message.to_string());
        self
    }

    /// Make uploads of the named file fail.
    pub fn failing_upload(mut self, file_name: &str) -> Self {
        self.failing_uploads.insert(file_name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn creates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Create(..)))
            .count()
    }

    pub fn updates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Update(..)))
            .count()
    }

    pub fn uploaded_names(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Upload { file_name, .. } => Some(file_name),
                _ => None,
            })
            .collect()
    }

    pub fn max_uploads_in_flight(&self) -> usize {
        self.max_uploads_in_flight.load(Ordering::SeqCst)
    }

    pub fn story(&self, id: u64) -> Option<Story> {
        self.stories.lock().unwrap().get(&id).cloned()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn story_from_payload(id: u64, project_id: u64, payload: &StoryPayload) -> Story {
    Story {
        id,
        project_id,
        as_a: payload.as_a.clone(),
        i_want_to: payload.i_want_to.clone(),
        so_that: payload.so_that.clone(),
        acceptance_criteria: Some(payload.acceptance_criteria.clone()),
        priority: payload.priority,
        story_points: payload.story_points,
        notes: Some(payload.notes.clone()),
        status: StoryStatus::Draft,
        version: 1,
        created_at: None,
        updated_at: None,
    }
}

pub fn sample_story(id: u64, project_id: u64) -> Story {
    Story {
        id,
        project_id,
        as_a: "accountant".to_string(),
        i_want_to: "filter invoices by month".to_string(),
        so_that: "I can close the books".to_string(),
        acceptance_criteria: Some("Month picker shown\n\nTotals update".to_string()),
        priority: Priority::High,
        story_points: Some(8),
        notes: Some("Check with finance".to_string()),
        status: StoryStatus::Approved,
        version: 3,
        created_at: None,
        updated_at: None,
    }
}

#[async_trait]
impl StoryBackend for RecordingBackend {
    async fn get_story(&self, story_id: u64) -> Result<Story> {
        self.record(Call::GetStory(story_id));
        self.story(story_id)
            .ok_or_else(|| KokpitError::not_found("Story", story_id))
    }

    async fn list_stories(
        &self,
        project_id: u64,
        status: Option<StoryStatus>,
    ) -> Result<Vec<Story>> {
        self.record(Call::ListStories(project_id, status));
        let mut stories: Vec<Story> = self
            .stories
            .lock()
            .unwrap()
            .values()
            .filter(|story| story.project_id == project_id)
            .filter(|story| status.map_or(true, |status| story.status == status))
            .cloned()
            .collect();
        stories.sort_by_key(|story| story.id);
        Ok(stories)
    }

    async fn create_story(&self, project_id: u64, payload: &StoryPayload) -> Result<Story> {
        self.record(Call::Create(project_id, payload.clone()));
        if let Some(message) = &self.reject_saves_with {
            return Err(KokpitError::Validation {
                message: message.clone(),
            });
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let story = story_from_payload(id, project_id, payload);
        self.stories.lock().unwrap().insert(id, story.clone());
        Ok(story)
    }

    async fn update_story(&self, story_id: u64, payload: &StoryPayload) -> Result<Story> {
        self.record(Call::Update(story_id, payload.clone()));
        if let Some(message) = &self.reject_saves_with {
            return Err(KokpitError::Validation {
                message: message.clone(),
            });
        }
        let mut stories = self.stories.lock().unwrap();
        let existing = stories
            .get(&story_id)
            .ok_or_else(|| KokpitError::not_found("Story", story_id))?;
        let mut story = story_from_payload(story_id, existing.project_id, payload);
        story.version = existing.version + 1;
        stories.insert(story_id, story.clone());
        Ok(story)
    }

    async fn upload_attachment(
        &self,
        story_id: u64,
        content: Vec<u8>,
        file_name: &str,
    ) -> Result<Attachment> {
        let in_flight = self.uploads_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_uploads_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        self.record(Call::Upload {
            story_id,
            file_name: file_name.to_string(),
            size: content.len(),
        });

        // Give any concurrently started upload a chance to run
        tokio::task::yield_now().await;
        self.uploads_in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_uploads.contains(file_name) {
            return Err(KokpitError::Status {
                status: 500,
                message: "storage unavailable".to_string(),
            });
        }
        Ok(Attachment {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            filename: file_name.to_string(),
            size: content.len() as u64,
        })
    }

    async fn list_attachments(&self, story_id: u64) -> Result<Vec<Attachment>> {
        self.record(Call::ListAttachments(story_id));
        Ok(Vec::new())
    }
}
