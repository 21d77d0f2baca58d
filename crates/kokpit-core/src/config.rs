//! Backend connection settings and the builder that resolves them.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use log::debug;
use serde::Deserialize;

use crate::{
    backend::HttpBackend,
    error::{KokpitError, Result, ResultExt},
};

/// Base URL used when neither the caller nor the config file provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved settings for talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// API root, without a trailing slash
    pub base_url: String,
    /// Bearer token sent with every request, if any
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// On-disk configuration; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    token: Option<String>,
    timeout_secs: Option<u64>,
}

/// Builder for creating and configuring [`HttpBackend`] instances.
///
/// Explicit settings win over the config file, which wins over defaults.
#[derive(Debug, Clone, Default)]
pub struct BackendBuilder {
    base_url: Option<String>,
    token: Option<String>,
    timeout: Option<Duration>,
    config_path: Option<PathBuf>,
}

impl BackendBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API root URL.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: Option<S>) -> Self {
        if let Some(url) = base_url {
            self.base_url = Some(url.into());
        }
        self
    }

    /// Sets the bearer token.
    pub fn with_token<S: Into<String>>(mut self, token: Option<S>) -> Self {
        if let Some(token) = token {
            self.token = Some(token.into());
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a custom config file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_CONFIG_HOME/kokpit/config.json` or `~/.config/kokpit/config.json`
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.config_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Resolves the final settings without building a client.
    ///
    /// # Errors
    ///
    /// Returns `KokpitError::Configuration` if the config file is malformed
    /// or the resulting base URL is empty.
    pub fn resolve(self) -> Result<BackendConfig> {
        let config_path = match self.config_path {
            Some(path) => Some(path),
            None => Self::default_config_path(),
        };
        let file = match config_path {
            Some(path) => load_config_file(&path)?,
            None => ConfigFile::default(),
        };

        let base_url = self
            .base_url
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(KokpitError::Configuration {
                message: "base_url must not be empty".to_string(),
            });
        }

        let token = self
            .token
            .or(file.token)
            .filter(|token| !token.trim().is_empty());
        let timeout = self
            .timeout
            .or(file.timeout_secs.map(Duration::from_secs))
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(BackendConfig {
            base_url,
            token,
            timeout,
        })
    }

    /// Builds the configured backend client.
    pub fn build(self) -> Result<HttpBackend> {
        HttpBackend::new(self.resolve()?)
    }

    /// Returns the default config path following the XDG Base Directory
    /// specification, or `None` when no home directory can be determined.
    fn default_config_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("kokpit").get_config_file("config.json")
    }
}

fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No config file at {}", path.display());
            return Ok(ConfigFile::default());
        }
        Err(e) => {
            return Err(KokpitError::FileSystem {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    debug!("Loading config from {}", path.display());
    serde_json::from_str(&contents)
        .with_context_lazy(|| format!("Invalid config file '{}'", path.display()))
}
