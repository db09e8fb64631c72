use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::constants::{ARCHIVE_USER_AGENT, DEFAULT_BASE_URL, DEFAULT_MEDIA_BASE_URL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("unknown archive backend '{0}', expected 'json' or 'html'")]
    UnknownBackend(String),
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Wire strategy used to talk to the archive site.
///
/// The mirror has been observed serving two mutually exclusive shapes for the
/// same record: a JSON document and a plain HTML page. One adapter core
/// supports both behind [`crate::backend::ArchiveBackend`]; this selects which
/// one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// JSON record lookups, archive requests via GET.
    #[default]
    Json,
    /// HTML page scraping, archive requests via form POST.
    Html,
}

impl BackendKind {
    /// Parse a backend selector from its configuration string.
    ///
    /// # Errors
    ///
    /// Returns an error for anything other than `json` or `html` (case-insensitive).
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            _ => Err(ConfigError::UnknownBackend(value.to_string())),
        }
    }
}

/// Adapter configuration, handed in by the host when the source is enabled.
///
/// Established once and threaded explicitly through every component; nothing
/// in the adapter reads ambient state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identifier the host assigned to this plugin instance, if any.
    pub plugin_id: Option<String>,
    /// Base URL of the archive mirror.
    pub base_url: String,
    /// Base URL of the CDN serving archived media files.
    pub media_base_url: String,
    /// Wire strategy for record lookups and archive submissions.
    pub backend: BackendKind,
    /// User agent sent on every request.
    pub user_agent: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plugin_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            media_base_url: DEFAULT_MEDIA_BASE_URL.to_string(),
            backend: BackendKind::default(),
            user_agent: ARCHIVE_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url("base_url", &self.base_url)?;
        validate_base_url("media_base_url", &self.media_base_url)?;
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "request_timeout".to_string(),
                message: "must be non-zero".to_string(),
            });
        }
        if self.user_agent.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "user_agent".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Configuration pointing both base URLs at a test server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            plugin_id: Some("test-plugin".to_string()),
            base_url: base_url.trim_end_matches('/').to_string(),
            media_base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(5),
            ..Self::default()
        }
    }
}

fn validate_base_url(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            message: "cannot be empty".to_string(),
        });
    }
    if value.ends_with('/') {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            message: "must not end with a slash".to_string(),
        });
    }
    let parsed = Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            message: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(())
}
