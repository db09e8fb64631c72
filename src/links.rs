//! URL classification and identifier extraction.
//!
//! The archive mirrors YouTube's content addressing, so a URL pasted by a
//! user may point at either site. Both URL families funnel into one
//! identifier space: archive permalinks carry the token directly, and every
//! recognized YouTube form carries the same 11-character video ID.
//!
//! Recognition is an ordered list of patterns, first match wins. All
//! functions here are pure; no network access.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Content URL patterns, in match order. Each has exactly one capture group:
/// the content identifier.
static CONTENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Archive permalink: token length is unconstrained
        Regex::new(r"^https?://ghostarchive\.org/varchive/([\w-]+)").unwrap(),
        // YouTube watch URL; tolerates query parameters before v=
        Regex::new(r"^https?://(?:www\.|music\.|m\.)?youtube\.com/watch\?(?:.*&)?v=([\w-]{11})")
            .unwrap(),
        Regex::new(r"^https?://youtu\.be/([\w-]{11})").unwrap(),
        Regex::new(r"^https?://(?:www\.)?youtube\.com/embed/([\w-]{11})").unwrap(),
        Regex::new(r"^https?://(?:www\.)?youtube\.com/v/([\w-]{11})").unwrap(),
        Regex::new(r"^https?://(?:www\.|m\.)?youtube\.com/shorts/([\w-]{11})").unwrap(),
    ]
});

type ChannelIdCtor = fn(String) -> ChannelId;

/// Channel URL patterns, in match order, paired with the identifier variant
/// the captured token belongs to.
static CHANNEL_PATTERNS: Lazy<Vec<(Regex, ChannelIdCtor)>> = Lazy::new(|| {
    vec![
        (
            // Canonical channel ID, on the mirror or the original platform
            Regex::new(r"^https?://(?:www\.)?(?:youtube\.com|ghostarchive\.org)/channel/(UC[\w-]{22})")
                .unwrap(),
            ChannelId::Id as ChannelIdCtor,
        ),
        (
            Regex::new(r"^https?://(?:www\.|m\.)?youtube\.com/(@[\w.-]+)").unwrap(),
            ChannelId::Handle,
        ),
        (
            Regex::new(r"^https?://(?:www\.)?youtube\.com/c/([\w.-]+)").unwrap(),
            ChannelId::Custom,
        ),
        (
            Regex::new(r"^https?://(?:www\.)?youtube\.com/user/([\w.-]+)").unwrap(),
            ChannelId::User,
        ),
    ]
});

/// Opaque content identifier extracted from a URL.
///
/// YouTube-derived tokens are exactly 11 URL-safe characters; tokens taken
/// from archive permalinks are unconstrained in length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentId(String);

impl ContentId {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Channel identifier extracted from a URL.
///
/// The token shape differs per URL family, and so does the way it expands
/// back into a channel URL. Keeping the variant explicit makes the
/// reconstruction strategy a per-variant decision instead of a single
/// one-size-fits-all template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChannelId {
    /// Raw channel ID (`UC` prefix + 22 URL-safe characters).
    Id(String),
    /// Handle, including the leading `@`.
    Handle(String),
    /// Legacy custom-name slug (`/c/<slug>`).
    Custom(String),
    /// Legacy user slug (`/user/<slug>`).
    User(String),
}

impl ChannelId {
    /// The raw token, as captured from the URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Id(token) | Self::Handle(token) | Self::Custom(token) | Self::User(token) => {
                token
            }
        }
    }

    /// Reconstruct the channel URL this identifier came from, rooted at `base`.
    #[must_use]
    pub fn canonical_url(&self, base: &str) -> String {
        match self {
            Self::Id(id) => format!("{base}/channel/{id}"),
            Self::Handle(handle) => format!("{base}/{handle}"),
            Self::Custom(slug) => format!("{base}/c/{slug}"),
            Self::User(slug) => format!("{base}/user/{slug}"),
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the URL is a recognized content URL (archive permalink or any
/// YouTube video form).
#[must_use]
pub fn is_content_url(url: &str) -> bool {
    CONTENT_PATTERNS.iter().any(|p| p.is_match(url))
}

/// Whether the URL is a recognized channel URL.
#[must_use]
pub fn is_channel_url(url: &str) -> bool {
    CHANNEL_PATTERNS.iter().any(|(p, _)| p.is_match(url))
}

/// Extract a content identifier from a URL, or `None` if no pattern matches.
#[must_use]
pub fn extract_content_id(url: &str) -> Option<ContentId> {
    CONTENT_PATTERNS
        .iter()
        .find_map(|p| p.captures(url))
        .map(|captures| ContentId::new(&captures[1]))
}

/// Extract a channel identifier from a URL, or `None` if no pattern matches.
#[must_use]
pub fn extract_channel_id(url: &str) -> Option<ChannelId> {
    CHANNEL_PATTERNS
        .iter()
        .find_map(|(p, ctor)| p.captures(url).map(|captures| ctor(captures[1].to_string())))
}

/// Archive permalink for a content identifier.
#[must_use]
pub fn content_url(base: &str, id: &ContentId) -> String {
    format!("{base}/varchive/{id}")
}

/// Canonical watch URL on the original platform for a content identifier.
#[must_use]
pub fn watch_url(id: &ContentId) -> String {
    format!("https://www.youtube.com/watch?v={id}")
}
