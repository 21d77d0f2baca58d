//! reqwest-based client for the dashboard REST API.

use async_trait::async_trait;
use log::debug;
use reqwest::{multipart, Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use super::StoryBackend;
use crate::{
    config::BackendConfig,
    error::{KokpitError, Result},
    models::{Attachment, Story, StoryPayload, StoryStatus},
};

const USER_AGENT: &str = concat!("kokpit/", env!("CARGO_PKG_VERSION"));

/// Paginated list envelope used by the list endpoints.
#[derive(Debug, Deserialize)]
struct Page<T> {
    items: Vec<T>,
}

/// HTTP implementation of [`StoryBackend`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl HttpBackend {
    /// Create a client from resolved settings.
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| KokpitError::http("Failed to build HTTP client").with_source(e))?;

        Ok(Self {
            base_url: config.base_url,
            token: config.token,
            client,
        })
    }

    /// API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.url(path))
            .header("Accept", "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode the JSON response, mapping failure statuses
    /// onto the error taxonomy. `resource` and `id` name the record a 404
    /// refers to.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        resource: &str,
        id: u64,
    ) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| KokpitError::http("Failed to send request").with_source(e))?;

        let status = response.status();
        debug!("{} {} -> {}", resource, id, status);
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| KokpitError::http("Failed to parse response").with_source(e));
        }

        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status, &body, resource, id))
    }
}

#[async_trait]
impl StoryBackend for HttpBackend {
    async fn get_story(&self, story_id: u64) -> Result<Story> {
        let request = self.request(Method::GET, &format!("/stories/{story_id}"));
        self.send(request, "Story", story_id).await
    }

    async fn list_stories(
        &self,
        project_id: u64,
        status: Option<StoryStatus>,
    ) -> Result<Vec<Story>> {
        let mut request = self.request(Method::GET, &format!("/projects/{project_id}/stories"));
        if let Some(status) = status {
            request = request.query(&[("status", status.as_str())]);
        }
        let page: Page<Story> = self.send(request, "Project", project_id).await?;
        Ok(page.items)
    }

    async fn create_story(&self, project_id: u64, payload: &StoryPayload) -> Result<Story> {
        let request = self
            .request(Method::POST, &format!("/projects/{project_id}/stories"))
            .json(payload);
        self.send(request, "Project", project_id).await
    }

    async fn update_story(&self, story_id: u64, payload: &StoryPayload) -> Result<Story> {
        let request = self
            .request(Method::PUT, &format!("/stories/{story_id}"))
            .json(payload);
        self.send(request, "Story", story_id).await
    }

    async fn upload_attachment(
        &self,
        story_id: u64,
        content: Vec<u8>,
        file_name: &str,
    ) -> Result<Attachment> {
        let part = multipart::Part::bytes(content).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);
        let request = self
            .request(Method::POST, &format!("/stories/{story_id}/attachments"))
            .multipart(form);
        self.send(request, "Story", story_id).await
    }

    async fn list_attachments(&self, story_id: u64) -> Result<Vec<Attachment>> {
        let request = self.request(Method::GET, &format!("/stories/{story_id}/attachments"));
        self.send(request, "Story", story_id).await
    }
}

/// Map a failure status and its body onto a [`KokpitError`].
pub(crate) fn error_for_status(status: StatusCode, body: &str, resource: &str, id: u64) -> KokpitError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => KokpitError::Validation {
            message: server_message(body),
        },
        StatusCode::NOT_FOUND => KokpitError::not_found(resource, id),
        StatusCode::PAYLOAD_TOO_LARGE => KokpitError::PayloadTooLarge {
            message: server_message(body),
        },
        other => KokpitError::Status {
            status: other.as_u16(),
            message: server_message(body),
        },
    }
}

/// Extract the human-readable message from an error body.
///
/// Looks at `detail`, `message` and `error` in that order; `detail` may also
/// be a list of `{ "msg": ... }` objects. Falls back to the raw body.
pub(crate) fn server_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "message", "error"] {
            match value.get(key) {
                Some(Value::String(text)) => return text.clone(),
                Some(Value::Array(entries)) => {
                    let messages: Vec<&str> = entries
                        .iter()
                        .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                        .collect();
                    if !messages.is_empty() {
                        return messages.join("; ");
                    }
                }
                _ => {}
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed".to_string()
    } else {
        trimmed.to_string()
    }
}
