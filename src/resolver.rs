//! Content detail resolution.
//!
//! One URL in, one fully mapped `PlatformVideoDetails` out — or one of the
//! typed failures in [`SourceError`]. At most two sequential network calls
//! per resolution: the record lookup, then (only on the not-archived branch)
//! the archive submission.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::backend::{ArchiveBackend, RecordLookup};
use crate::config::Config;
use crate::constants::PLATFORM;
use crate::error::SourceError;
use crate::links::{self, ContentId};
use crate::model::{
    ArchiveRecord, AuthorLink, PlatformId, PlatformVideoDetails, Thumbnail, VideoSourceDescriptor,
    VideoUrlSource,
};

pub struct ContentResolver {
    config: Config,
    backend: Box<dyn ArchiveBackend>,
}

impl ContentResolver {
    #[must_use]
    pub fn new(config: Config, backend: Box<dyn ArchiveBackend>) -> Self {
        Self { config, backend }
    }

    /// Resolve a content URL into playable details.
    ///
    /// # Errors
    ///
    /// * [`SourceError::InvalidUrl`] when no identifier can be extracted.
    /// * [`SourceError::FetchFailed`] on transport failure or a malformed
    ///   response.
    /// * [`SourceError::CaptchaRequired`] when the content is not archived
    ///   yet; an archive request has already been submitted and the error
    ///   carries the submission URL and response body for the host's
    ///   interactive challenge.
    /// * [`SourceError::Unavailable`] when the record is disabled. No
    ///   submission is issued on this branch.
    pub async fn resolve(&self, url: &str) -> Result<PlatformVideoDetails, SourceError> {
        let id = links::extract_content_id(url)
            .ok_or_else(|| SourceError::InvalidUrl(url.to_string()))?;
        debug!(id = %id, "Resolving content details");

        let record = match self.backend.fetch_record(&id).await? {
            RecordLookup::Found(record) => record,
            RecordLookup::NotArchived => {
                let watch_url = links::watch_url(&id);
                info!(id = %id, "Content not archived yet, submitting archive request");
                let submission = self.backend.submit_archive_request(&watch_url).await?;
                return Err(SourceError::CaptchaRequired {
                    url: submission.url,
                    body: submission.body,
                });
            }
        };

        if record.disabled {
            return Err(SourceError::Unavailable);
        }

        Ok(self.into_details(&id, record))
    }

    fn into_details(&self, id: &ContentId, record: ArchiveRecord) -> PlatformVideoDetails {
        let author = self.author_link(&record);

        let title = record
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("Video {id}"));

        let thumbnails = record
            .thumbnail
            .into_iter()
            .filter(|t| !t.is_empty())
            .map(|url| Thumbnail { url, quality: 0 })
            .collect();

        let source_url = record.source_url.unwrap_or_else(|| {
            format!("{}/video/{id}/{id}.mp4", self.config.media_base_url)
        });

        PlatformVideoDetails {
            id: PlatformId::new(PLATFORM, record.id, self.config.plugin_id.clone()),
            title,
            thumbnails,
            author,
            upload_date: parse_upload_date(record.published.as_deref()),
            duration: 0,
            view_count: -1,
            url: links::content_url(&self.config.base_url, id),
            is_live: false,
            description: record.description.unwrap_or_default(),
            video: VideoSourceDescriptor {
                sources: vec![VideoUrlSource {
                    name: "MP4".to_string(),
                    container: "video/mp4".to_string(),
                    url: source_url,
                    width: 0,
                    height: 0,
                    duration: 0,
                    codec: "vp9".to_string(),
                }],
            },
        }
    }

    /// Build the author link from whichever channel fields the backend could
    /// fill: a raw channel ID, or just a channel URL to re-derive one from.
    fn author_link(&self, record: &ArchiveRecord) -> AuthorLink {
        let base = &self.config.base_url;
        let (value, url) = if let Some(channel_id) = &record.channel_id {
            (channel_id.clone(), Some(format!("{base}/channel/{channel_id}")))
        } else if let Some(channel_url) = &record.channel_url {
            match links::extract_channel_id(channel_url) {
                Some(id) => (id.as_str().to_string(), Some(id.canonical_url(base))),
                None => ("unknown".to_string(), Some(channel_url.clone())),
            }
        } else {
            ("unknown".to_string(), None)
        };

        AuthorLink {
            id: PlatformId::new(PLATFORM, value, self.config.plugin_id.clone()),
            name: record
                .channel_name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            url,
            thumbnail_url: record.channel_avatar.clone(),
        }
    }
}

/// Best-effort upload-date parsing.
///
/// Accepts RFC 3339 / RFC 2822 timestamps, long-form dates like
/// "December 17, 2023", and plain `YYYY-MM-DD`. A missing or unparseable
/// value substitutes the current time rather than failing the resolution.
fn parse_upload_date(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Utc::now();
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Utc);
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(raw) {
        return ts.with_timezone(&Utc);
    }
    for format in ["%B %d, %Y", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return midnight.and_utc();
            }
        }
    }

    debug!(raw = %raw, "Unparseable upload date, substituting current time");
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    #[test]
    fn test_parse_upload_date_rfc3339() {
        let parsed = parse_upload_date(Some("2023-12-17T10:30:00Z"));
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 12, 17, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_upload_date_long_form() {
        let parsed = parse_upload_date(Some("December 17, 2023"));
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 12, 17, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_upload_date_plain() {
        let parsed = parse_upload_date(Some("2009-10-25"));
        assert_eq!(parsed.year(), 2009);
        assert_eq!(parsed.month(), 10);
        assert_eq!(parsed.day(), 25);
    }

    #[test]
    fn test_parse_upload_date_falls_back_to_now() {
        for raw in [None, Some(""), Some("   "), Some("sometime last week")] {
            let parsed = parse_upload_date(raw);
            let age = (Utc::now() - parsed).num_seconds().abs();
            assert!(age < 5, "fallback timestamp too far from now for {raw:?}");
        }
    }
}
