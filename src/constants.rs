//! Shared constants used across the adapter.

/// Platform name reported to the host in every `PlatformId`.
pub const PLATFORM: &str = "GhostArchive";

/// Default base URL of the archive mirror.
pub const DEFAULT_BASE_URL: &str = "https://ghostarchive.org";

/// Default base URL of the CDN serving archived media files.
pub const DEFAULT_MEDIA_BASE_URL: &str = "https://ghostvideo.b-cdn.net";

/// User agent string used for archive HTTP requests.
///
/// This is a realistic browser user agent that is indistinguishable from a real browser,
/// making lookups appear as normal browser traffic.
pub const ARCHIVE_USER_AGENT: &str =
    "Mozilla/5.0 (Linux; Android 14) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.6778.200 Mobile Safari/537.36";
