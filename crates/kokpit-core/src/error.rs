//! Error types for the kokpit library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all kokpit operations.
#[derive(Error, Debug)]
pub enum KokpitError {
    /// The backend rejected a payload; carries the server-provided message
    #[error("{message}")]
    Validation { message: String },
    /// Referenced record does not exist on the backend
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: u64 },
    /// The backend refused an upload because of its size
    #[error("Payload too large: {message}")]
    PayloadTooLarge { message: String },
    /// A file was rejected before it could be queued for upload
    #[error("File '{name}' is too large ({size} bytes, limit is {limit} bytes)")]
    SizeLimitExceeded { name: String, size: u64, limit: u64 },
    /// Transport-level failure talking to the backend
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },
    /// Non-success status not covered by a more specific variant
    #[error("Server responded with status {status}: {message}")]
    Status { status: u16, message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// An editor operation was requested while no editor is open
    #[error("No story editor is open")]
    EditorClosed,
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> KokpitError {
        KokpitError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

/// Builder for transport errors.
pub struct HttpErrorBuilder {
    message: String,
}

impl HttpErrorBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the underlying reqwest error attached.
    pub fn with_source(self, source: reqwest::Error) -> KokpitError {
        KokpitError::Http {
            message: format!("{}: {}", self.message, source),
            source: Some(source),
        }
    }
}

impl KokpitError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a builder for transport errors.
    pub fn http(message: impl Into<String>) -> HttpErrorBuilder {
        HttpErrorBuilder::new(message)
    }

    /// Creates a not-found error for a resource kind.
    pub fn not_found(resource: impl Into<String>, id: u64) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    /// Message suitable for showing to the user in a notification.
    ///
    /// Validation failures surface the server's own wording; a vanished
    /// record is reported generically.
    pub fn user_message(&self) -> String {
        match self {
            KokpitError::Validation { message } => message.clone(),
            KokpitError::NotFound { .. } => {
                "The operation failed because the record no longer exists".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Whether the error came from the backend rejecting the request rather
    /// than from transport or local problems.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            KokpitError::Validation { .. }
                | KokpitError::NotFound { .. }
                | KokpitError::PayloadTooLarge { .. }
                | KokpitError::Status { .. }
        )
    }
}

/// Failure of a single attachment upload.
///
/// Upload failures are isolated per file, so they carry the file name
/// alongside the cause.
#[derive(Error, Debug)]
#[error("Failed to upload {file_name}")]
pub struct UploadError {
    pub file_name: String,
    #[source]
    pub source: KokpitError,
}

impl UploadError {
    pub fn new(file_name: impl Into<String>, source: KokpitError) -> Self {
        Self {
            file_name: file_name.into(),
            source,
        }
    }
}

/// Extension trait for Result to attach context while converting into a
/// [`KokpitError::Configuration`].
pub trait ResultExt<T, E> {
    /// Add context to any error type.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Add lazily computed context to any error type.
    fn with_context_lazy<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| KokpitError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }

    fn with_context_lazy<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| KokpitError::Configuration {
            message: format!("{}: {}", f(), e),
        })
    }
}

/// Result type alias for kokpit operations
pub type Result<T> = std::result::Result<T, KokpitError>;
