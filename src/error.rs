//! Failure taxonomy for detail resolution.
//!
//! Every variant is terminal for the call that produced it; nothing retries
//! internally. The host tells them apart to render the right UI: a retry
//! button, an "unavailable" placard, or an interactive challenge.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// No content identifier could be extracted from the input. Caller error.
    #[error("no content identifier could be extracted from '{0}'")]
    InvalidUrl(String),

    /// Transport failure or malformed response. Potentially transient, but
    /// not retried here.
    #[error("failed to fetch archive record from {url}")]
    FetchFailed {
        url: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The archive has this record but it is disabled. Permanent.
    #[error("the archived video has been disabled")]
    Unavailable,

    /// The content is not archived yet. An archive request has been
    /// submitted; the user must complete the challenge at `url` before
    /// resolution can succeed on a later call.
    #[error("content is not archived yet; complete the challenge at {url}")]
    CaptchaRequired { url: String, body: String },

    /// A raw comment payload was not valid comment JSON.
    #[error("malformed comment payload")]
    InvalidComment(#[source] serde_json::Error),
}
