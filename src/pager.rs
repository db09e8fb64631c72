//! Pagination context model.
//!
//! Every listing operation packages its input parameters verbatim into a
//! [`PaginationContext`] and hands back a [`Pager`]. Calling
//! [`Pager::next_page`] re-invokes the originating operation with the
//! parameters pulled back out of the context, so a next-page call is always
//! reproducible from the context alone.
//!
//! This adapter has no upstream listing capability; every listing goes
//! through the explicit empty-listing strategy ([`Pager::empty`]) — no
//! results, `has_more == false` — which is a valid terminal state, not a
//! failure.

use std::collections::BTreeMap;

use crate::model::{Comment, PlatformChannel, PlatformVideo};
use crate::source::GhostArchiveSource;

/// Parameters needed to reproduce or continue a listing call.
///
/// Immutable once handed back to the caller; the caller returns it unchanged
/// (inside the pager) to request the next page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationContext {
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub order: Option<String>,
    /// Filter-group ID to selected filter values.
    pub filters: BTreeMap<String, Vec<String>>,
    /// Opaque continuation token.
    pub continuation: Option<String>,
    /// Channel or content URL for scoped listings.
    pub target_url: Option<String>,
}

/// Which listing operation produced a pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Home,
    Search,
    SearchChannels,
    SearchChannelContents,
    ChannelContents,
    Comments,
}

/// One page of listing results plus the state to fetch the next one.
#[derive(Debug, Clone)]
pub struct Pager<T> {
    results: Vec<T>,
    has_more: bool,
    context: PaginationContext,
    kind: ListingKind,
}

pub type VideoPager = Pager<PlatformVideo>;
pub type ChannelPager = Pager<PlatformChannel>;
pub type CommentPager = Pager<Comment>;

impl<T> Pager<T> {
    /// The empty-listing strategy: no results, no further pages, context
    /// preserved for reproducibility.
    pub(crate) fn empty(kind: ListingKind, context: PaginationContext) -> Self {
        Self {
            results: Vec::new(),
            has_more: false,
            context,
            kind,
        }
    }

    #[must_use]
    pub fn results(&self) -> &[T] {
        &self.results
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub fn context(&self) -> &PaginationContext {
        &self.context
    }

    #[must_use]
    pub fn kind(&self) -> ListingKind {
        self.kind
    }
}

impl Pager<PlatformVideo> {
    /// Re-invoke the originating listing operation. Callable any number of
    /// times; with no further pages it repeats the same empty page.
    #[must_use]
    pub fn next_page(&self, source: &GhostArchiveSource) -> Self {
        let ctx = self.context.clone();
        match self.kind {
            ListingKind::Home => source.get_home(ctx.continuation),
            ListingKind::Search => source.search(
                ctx.query.unwrap_or_default(),
                ctx.content_type,
                ctx.order,
                ctx.filters,
                ctx.continuation,
            ),
            ListingKind::SearchChannelContents => source.search_channel_contents(
                ctx.target_url.unwrap_or_default(),
                ctx.query.unwrap_or_default(),
                ctx.content_type,
                ctx.order,
                ctx.filters,
                ctx.continuation,
            ),
            ListingKind::ChannelContents => source.get_channel_contents(
                ctx.target_url.unwrap_or_default(),
                ctx.content_type,
                ctx.order,
                ctx.filters,
                ctx.continuation,
            ),
            // Not video listings; unreachable by construction
            ListingKind::SearchChannels | ListingKind::Comments => Self::empty(self.kind, ctx),
        }
    }
}

impl Pager<PlatformChannel> {
    /// Re-invoke the originating listing operation.
    #[must_use]
    pub fn next_page(&self, source: &GhostArchiveSource) -> Self {
        let ctx = self.context.clone();
        match self.kind {
            ListingKind::SearchChannels => {
                source.search_channels(ctx.query.unwrap_or_default(), ctx.continuation)
            }
            _ => Self::empty(self.kind, ctx),
        }
    }
}

impl Pager<Comment> {
    /// Re-invoke the originating listing operation.
    #[must_use]
    pub fn next_page(&self, source: &GhostArchiveSource) -> Self {
        let ctx = self.context.clone();
        match self.kind {
            ListingKind::Comments => {
                source.get_comments(ctx.target_url.unwrap_or_default(), ctx.continuation)
            }
            _ => Self::empty(self.kind, ctx),
        }
    }
}
