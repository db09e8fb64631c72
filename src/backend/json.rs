use async_trait::async_trait;
use reqwest::header::REFERER;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::{ArchiveBackend, ArchiveSubmission, RecordLookup};
use crate::error::SourceError;
use crate::links::{self, ContentId};
use crate::model::ArchiveRecord;

/// JSON-API strategy: record lookups return a JSON document, archive
/// requests go out as a GET with the target URL in the query string.
pub struct JsonBackend {
    client: Client,
    base_url: String,
}

/// Record document as the JSON API serves it.
#[derive(Debug, Deserialize)]
struct RecordWire {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default, rename = "channelId")]
    channel_id: Option<String>,
    #[serde(default, rename = "channel")]
    channel_name: Option<String>,
    #[serde(default, rename = "channelAvatar")]
    channel_avatar: Option<String>,
    #[serde(default)]
    published: Option<String>,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    source: Option<String>,
    /// Error envelope: the API reports a missing record as
    /// `{"error": true, "code": 404}`.
    #[serde(default)]
    error: bool,
    #[serde(default)]
    code: Option<u16>,
}

impl JsonBackend {
    #[must_use]
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl ArchiveBackend for JsonBackend {
    async fn fetch_record(&self, id: &ContentId) -> Result<RecordLookup, SourceError> {
        let url = links::content_url(&self.base_url, id);
        debug!(url = %url, "Fetching archive record");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::FetchFailed {
                url: url.clone(),
                source: Some(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 404 {
                return Ok(RecordLookup::NotArchived);
            }
            debug!(url = %url, status = %status, "Record lookup failed");
            return Err(SourceError::FetchFailed { url, source: None });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::FetchFailed {
                url: url.clone(),
                source: Some(e),
            })?;
        if body.is_empty() {
            return Err(SourceError::FetchFailed { url, source: None });
        }

        let wire: RecordWire = serde_json::from_str(&body)
            .map_err(|_| SourceError::FetchFailed {
                url: url.clone(),
                source: None,
            })?;

        if wire.error {
            if wire.code == Some(404) {
                return Ok(RecordLookup::NotArchived);
            }
            return Err(SourceError::FetchFailed { url, source: None });
        }

        Ok(RecordLookup::Found(ArchiveRecord {
            id: wire.id.unwrap_or_else(|| id.as_str().to_string()),
            title: wire.title,
            description: wire.description,
            thumbnail: wire.thumbnail,
            channel_id: wire.channel_id,
            channel_name: wire.channel_name,
            channel_avatar: wire.channel_avatar,
            channel_url: None,
            published: wire.published,
            disabled: wire.disabled,
            source_url: wire.source,
        }))
    }

    async fn submit_archive_request(
        &self,
        original_url: &str,
    ) -> Result<ArchiveSubmission, SourceError> {
        let url = format!(
            "{}/archive2?archive={}",
            self.base_url,
            urlencoding::encode(original_url)
        );
        info!(url = %original_url, "Requesting on-demand archival");

        let response = self
            .client
            .get(&url)
            .header(REFERER, format!("{}/", self.base_url))
            .send()
            .await
            .map_err(|e| SourceError::FetchFailed {
                url: url.clone(),
                source: Some(e),
            })?;

        let body = response.text().await.unwrap_or_default();
        Ok(ArchiveSubmission { url, body })
    }
}
