//! Archive-backend strategies.
//!
//! One resolver core, two wire shapes: the mirror answers record lookups
//! either with a JSON document or with a plain HTML page, and accepts
//! on-demand archive requests either via GET or via form POST. Each
//! combination lives behind [`ArchiveBackend`]; configuration picks one.

mod html;
mod json;

pub use html::HtmlBackend;
pub use json::JsonBackend;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::{BackendKind, Config};
use crate::error::SourceError;
use crate::links::ContentId;
use crate::model::ArchiveRecord;

/// Outcome of a record lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLookup {
    /// The archive holds a record for this identifier.
    Found(ArchiveRecord),
    /// The archive has never seen this identifier.
    NotArchived,
}

/// A submitted archive request: the URL the submission went to and the body
/// the archive answered with. Both are handed to the host so it can present
/// the interactive challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSubmission {
    pub url: String,
    pub body: String,
}

#[async_trait]
pub trait ArchiveBackend: Send + Sync {
    /// Look up the archive record for a content identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::FetchFailed`] on transport failure or a
    /// malformed response. A missing record is not an error; it is
    /// [`RecordLookup::NotArchived`].
    async fn fetch_record(&self, id: &ContentId) -> Result<RecordLookup, SourceError>;

    /// Ask the archive to capture `original_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::FetchFailed`] if the submission request itself
    /// cannot be sent.
    async fn submit_archive_request(
        &self,
        original_url: &str,
    ) -> Result<ArchiveSubmission, SourceError>;
}

/// Build the backend selected by the configuration.
#[must_use]
pub fn select(config: &Config, client: Client) -> Box<dyn ArchiveBackend> {
    match config.backend {
        BackendKind::Json => Box::new(JsonBackend::new(client, config.base_url.clone())),
        BackendKind::Html => Box::new(HtmlBackend::new(client, config.base_url.clone())),
    }
}
