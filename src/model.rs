//! Normalized content model shared with the host, plus the parsed archive
//! record the backends produce.
//!
//! The host defines the shape of these values; the adapter only fills them
//! in. Nothing here is persisted between calls.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::SourceError;

/// Platform-scoped identifier for a piece of content or an author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformId {
    pub platform: String,
    pub value: String,
    /// Host-assigned plugin instance ID, when known.
    pub plugin_id: Option<String>,
}

impl PlatformId {
    #[must_use]
    pub fn new(platform: &str, value: impl Into<String>, plugin_id: Option<String>) -> Self {
        Self {
            platform: platform.to_string(),
            value: value.into(),
            plugin_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: String,
    /// Quality rank; 0 when the source reports none.
    pub quality: u32,
}

/// Link to a content author (channel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorLink {
    pub id: PlatformId,
    pub name: String,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// A single playable variant of a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUrlSource {
    pub name: String,
    pub container: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub duration: u64,
    pub codec: String,
}

/// The set of playable variants for a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSourceDescriptor {
    pub sources: Vec<VideoUrlSource>,
}

/// Summary entry in a listing result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformVideo {
    pub id: PlatformId,
    pub title: String,
    pub thumbnails: Vec<Thumbnail>,
    pub author: AuthorLink,
    pub upload_date: DateTime<Utc>,
    pub duration: u64,
    pub view_count: i64,
    pub url: String,
    pub is_live: bool,
}

/// Fully resolved content details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformVideoDetails {
    pub id: PlatformId,
    pub title: String,
    pub thumbnails: Vec<Thumbnail>,
    pub author: AuthorLink,
    pub upload_date: DateTime<Utc>,
    pub duration: u64,
    /// −1 when the source cannot determine a view count.
    pub view_count: i64,
    pub url: String,
    pub is_live: bool,
    pub description: String,
    pub video: VideoSourceDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformChannel {
    pub id: PlatformId,
    pub name: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
}

/// One archived content item, as parsed off the wire.
///
/// The JSON strategy fills `channel_id`; the HTML strategy only ever learns a
/// channel link, so it fills `channel_url` instead. The resolver copes with
/// either.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveRecord {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub channel_id: Option<String>,
    pub channel_name: Option<String>,
    pub channel_avatar: Option<String>,
    pub channel_url: Option<String>,
    /// Upload date as the wire reported it, unparsed.
    pub published: Option<String>,
    pub disabled: bool,
    pub source_url: Option<String>,
}

/// A comment attached to a piece of content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub author_name: Option<String>,
    pub message: String,
    pub context: CommentContext,
}

/// Where a comment came from; enough to list its replies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommentContext {
    pub url: String,
    #[serde(default)]
    pub comment_id: Option<String>,
}

/// Comment value as handed over by the host.
///
/// The host may pass a raw JSON string or an already-structured comment; the
/// distinction is resolved here at the boundary rather than by runtime type
/// inspection downstream.
#[derive(Debug, Clone)]
pub enum CommentPayload {
    RawText(String),
    Structured(Comment),
}

impl CommentPayload {
    /// Resolve the payload into a structured comment.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidComment`] when a raw payload is not
    /// valid comment JSON.
    pub fn into_comment(self) -> Result<Comment, SourceError> {
        match self {
            Self::Structured(comment) => Ok(comment),
            Self::RawText(raw) => serde_json::from_str(&raw).map_err(SourceError::InvalidComment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_comment_payload_parses() {
        let raw = r#"{"message": "first", "context": {"url": "https://ghostarchive.org/varchive/abc", "comment_id": "c1"}}"#;
        let comment = CommentPayload::RawText(raw.to_string()).into_comment().unwrap();
        assert_eq!(comment.message, "first");
        assert_eq!(comment.context.comment_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_raw_comment_payload_rejects_bad_json() {
        let result = CommentPayload::RawText("not json".to_string()).into_comment();
        assert!(matches!(result, Err(SourceError::InvalidComment(_))));
    }

    #[test]
    fn test_structured_comment_passes_through() {
        let comment = Comment {
            author_name: None,
            message: "hi".to_string(),
            context: CommentContext {
                url: "https://ghostarchive.org/varchive/abc".to_string(),
                comment_id: None,
            },
        };
        let resolved = CommentPayload::Structured(comment.clone()).into_comment().unwrap();
        assert_eq!(resolved, comment);
    }
}
