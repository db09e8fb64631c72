use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::header::REFERER;
use reqwest::Client;
use tracing::{debug, info};

use super::{ArchiveBackend, ArchiveSubmission, RecordLookup};
use crate::error::SourceError;
use crate::links::{self, ContentId};
use crate::model::ArchiveRecord;

/// Literal marker the archive renders when it has no record for a token.
const NOT_FOUND_MARKER: &str = "Video not found";

/// Literal marker rendered when a record exists but playback is disabled.
const DISABLED_MARKER: &str = "This video has been disabled";

static RE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title>([^<]*)</title>").unwrap());

/// Uploader link; captures href and link text.
static RE_UPLOADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a[^>]+href="([^"]*/channel/[^"]*)"[^>]*>([^<]+)</a>"#).unwrap()
});

static RE_UPLOAD_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Upload date:\s*([A-Za-z]+ \d{1,2}, \d{4})").unwrap());

/// HTML-scraping strategy: record lookups mine a rendered page with fixed
/// patterns, archive requests go out as a form POST.
pub struct HtmlBackend {
    client: Client,
    base_url: String,
}

impl HtmlBackend {
    #[must_use]
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn mine_record(&self, id: &ContentId, body: &str) -> ArchiveRecord {
        let title = RE_TITLE
            .captures(body)
            .map(|c| c[1].trim().to_string())
            .filter(|t| !t.is_empty());

        let (channel_url, channel_name) = RE_UPLOADER.captures(body).map_or((None, None), |c| {
            (
                Some(absolute_url(&self.base_url, &c[1])),
                Some(c[2].trim().to_string()),
            )
        });

        let published = RE_UPLOAD_DATE.captures(body).map(|c| c[1].to_string());

        ArchiveRecord {
            id: id.as_str().to_string(),
            title,
            channel_url,
            channel_name,
            published,
            disabled: body.contains(DISABLED_MARKER),
            ..ArchiveRecord::default()
        }
    }
}

#[async_trait]
impl ArchiveBackend for HtmlBackend {
    async fn fetch_record(&self, id: &ContentId) -> Result<RecordLookup, SourceError> {
        let url = links::content_url(&self.base_url, id);
        debug!(url = %url, "Fetching archive page");

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
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::FetchFailed {
                url: url.clone(),
                source: Some(e),
            })?;

        // The archive has been seen answering missing records both with a 404
        // and with a 200 carrying the marker text.
        if status.as_u16() == 404 || body.contains(NOT_FOUND_MARKER) {
            return Ok(RecordLookup::NotArchived);
        }
        if !status.is_success() || body.is_empty() {
            debug!(url = %url, status = %status, "Archive page lookup failed");
            return Err(SourceError::FetchFailed { url, source: None });
        }

        Ok(RecordLookup::Found(self.mine_record(id, &body)))
    }

    async fn submit_archive_request(
        &self,
        original_url: &str,
    ) -> Result<ArchiveSubmission, SourceError> {
        let url = format!("{}/archive2", self.base_url);
        info!(url = %original_url, "Requesting on-demand archival");

        let response = self
            .client
            .post(&url)
            .header(REFERER, format!("{}/", self.base_url))
            .form(&[("archive", original_url)])
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

/// Resolve a possibly host-relative href against the configured base.
fn absolute_url(base: &str, href: &str) -> String {
    if href.starts_with('/') {
        format!("{base}{href}")
    } else {
        href.to_string()
    }
}
