//! Host-facing plugin surface.
//!
//! `GhostArchiveSource` implements the host's content-source contract:
//! capability descriptors, URL predicates, listing operations, content-detail
//! resolution, and comment listing. Listings carry no upstream capability
//! here and always go through the empty-listing strategy; detail resolution
//! is the only operation that touches the network.

use std::collections::BTreeMap;

use reqwest::Client;
use tracing::info;

use crate::backend;
use crate::config::{Config, ConfigError};
use crate::constants::PLATFORM;
use crate::error::SourceError;
use crate::links;
use crate::model::{CommentPayload, PlatformChannel, PlatformId, PlatformVideoDetails};
use crate::pager::{ChannelPager, CommentPager, ListingKind, Pager, PaginationContext, VideoPager};
use crate::resolver::ContentResolver;

/// Feed types a listing can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedType {
    Mixed,
    Videos,
}

/// Orderings a listing supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    Chronological,
    ReleaseTime,
}

/// One selectable filter value inside a filter group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub id: String,
    pub name: String,
    pub value: String,
}

/// A group of related filters (e.g. the date range buckets).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterGroup {
    pub id: String,
    pub name: String,
    pub is_multi_select: bool,
    pub options: Vec<FilterOption>,
}

/// Static search capability descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCapabilities {
    pub feed_types: Vec<FeedType>,
    pub sorts: Vec<Ordering>,
    pub filters: Vec<FilterGroup>,
}

/// The content source. Constructed once via [`GhostArchiveSource::enable`];
/// holds no mutable state across calls.
pub struct GhostArchiveSource {
    config: Config,
    resolver: ContentResolver,
}

impl GhostArchiveSource {
    /// Enable the source with host-provided configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn enable(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(ConfigError::HttpClient)?;

        let backend = backend::select(&config, client);
        info!(base_url = %config.base_url, backend = ?config.backend, "GhostArchive source enabled");

        Ok(Self {
            resolver: ContentResolver::new(config.clone(), backend),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Static search capabilities: mixed feed, two orderings, one
    /// single-select date-range filter group with four fixed buckets.
    #[must_use]
    pub fn search_capabilities(&self) -> SearchCapabilities {
        SearchCapabilities {
            feed_types: vec![FeedType::Mixed],
            sorts: vec![Ordering::Chronological, Ordering::ReleaseTime],
            filters: vec![FilterGroup {
                id: "date".to_string(),
                name: "Date".to_string(),
                is_multi_select: false,
                options: vec![
                    filter_option("today", "Last 24 hours", "today"),
                    filter_option("lastweek", "Last week", "thisweek"),
                    filter_option("lastmonth", "Last month", "thismonth"),
                    filter_option("lastyear", "Last year", "thisyear"),
                ],
            }],
        }
    }

    /// Static capabilities for searching within a channel.
    #[must_use]
    pub fn search_channel_contents_capabilities(&self) -> SearchCapabilities {
        SearchCapabilities {
            feed_types: vec![FeedType::Mixed],
            sorts: vec![Ordering::Chronological],
            filters: Vec::new(),
        }
    }

    /// Search suggestions for a query prefix. This source offers none.
    #[must_use]
    pub fn search_suggestions(&self, _query: &str) -> Vec<String> {
        Vec::new()
    }

    /// Whether `url` resolves through [`Self::get_content_details`].
    #[must_use]
    pub fn is_content_details_url(&self, url: &str) -> bool {
        links::is_content_url(url)
    }

    /// Whether `url` names a channel this source recognizes.
    #[must_use]
    pub fn is_channel_url(&self, url: &str) -> bool {
        links::is_channel_url(url)
    }

    #[must_use]
    pub fn get_home(&self, continuation: Option<String>) -> VideoPager {
        let context = PaginationContext {
            continuation,
            ..PaginationContext::default()
        };
        Pager::empty(ListingKind::Home, context)
    }

    #[must_use]
    pub fn search(
        &self,
        query: String,
        content_type: Option<String>,
        order: Option<String>,
        filters: BTreeMap<String, Vec<String>>,
        continuation: Option<String>,
    ) -> VideoPager {
        let context = PaginationContext {
            query: Some(query),
            content_type,
            order,
            filters,
            continuation,
            target_url: None,
        };
        Pager::empty(ListingKind::Search, context)
    }

    #[must_use]
    pub fn search_channels(&self, query: String, continuation: Option<String>) -> ChannelPager {
        let context = PaginationContext {
            query: Some(query),
            continuation,
            ..PaginationContext::default()
        };
        Pager::empty(ListingKind::SearchChannels, context)
    }

    #[must_use]
    pub fn search_channel_contents(
        &self,
        channel_url: String,
        query: String,
        content_type: Option<String>,
        order: Option<String>,
        filters: BTreeMap<String, Vec<String>>,
        continuation: Option<String>,
    ) -> VideoPager {
        let context = PaginationContext {
            query: Some(query),
            content_type,
            order,
            filters,
            continuation,
            target_url: Some(channel_url),
        };
        Pager::empty(ListingKind::SearchChannelContents, context)
    }

    #[must_use]
    pub fn get_channel_contents(
        &self,
        channel_url: String,
        content_type: Option<String>,
        order: Option<String>,
        filters: BTreeMap<String, Vec<String>>,
        continuation: Option<String>,
    ) -> VideoPager {
        let context = PaginationContext {
            query: None,
            content_type,
            order,
            filters,
            continuation,
            target_url: Some(channel_url),
        };
        Pager::empty(ListingKind::ChannelContents, context)
    }

    /// Resolve a channel URL into a channel reference.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidUrl`] when no channel identifier can be
    /// extracted.
    pub fn get_channel(&self, url: &str) -> Result<PlatformChannel, SourceError> {
        let id = links::extract_channel_id(url)
            .ok_or_else(|| SourceError::InvalidUrl(url.to_string()))?;
        Ok(PlatformChannel {
            id: PlatformId::new(PLATFORM, id.as_str(), self.config.plugin_id.clone()),
            name: id.as_str().trim_start_matches('@').to_string(),
            url: id.canonical_url(&self.config.base_url),
            thumbnail_url: None,
        })
    }

    /// Resolve a content URL into playable details. See
    /// [`ContentResolver::resolve`] for the failure taxonomy.
    ///
    /// # Errors
    ///
    /// Propagates every [`SourceError`] from the resolver unchanged.
    pub async fn get_content_details(&self, url: &str) -> Result<PlatformVideoDetails, SourceError> {
        self.resolver.resolve(url).await
    }

    #[must_use]
    pub fn get_comments(&self, url: String, continuation: Option<String>) -> CommentPager {
        let context = PaginationContext {
            continuation,
            target_url: Some(url),
            ..PaginationContext::default()
        };
        Pager::empty(ListingKind::Comments, context)
    }

    /// List replies to a comment. The payload is resolved at this boundary;
    /// a raw payload must be valid comment JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidComment`] for an unparseable raw
    /// payload.
    pub fn get_sub_comments(&self, payload: CommentPayload) -> Result<CommentPager, SourceError> {
        let comment = payload.into_comment()?;
        Ok(self.get_comments(comment.context.url, None))
    }
}

fn filter_option(id: &str, name: &str, value: &str) -> FilterOption {
    FilterOption {
        id: id.to_string(),
        name: name.to_string(),
        value: value.to_string(),
    }
}
