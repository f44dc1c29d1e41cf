//! Error type for a single fetch.

use thiserror::Error;

/// Failure of one GET + JSON decode.
#[derive(Debug, Error)]
pub enum FetchError {
    /// API root or film reference is not a usable URL.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// Collection name was empty after trimming slashes.
    #[error("collection name is empty")]
    EmptyCollection,
    /// Curl reported an error (connection refused, timeout, empty reply, ...).
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// Body was not JSON, or not the shape the caller asked for.
    #[error("GET {url}: body is not the expected JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    /// The blocking task running the transfer panicked or was cancelled.
    #[error("GET {url}: transfer task did not complete: {source}")]
    Join {
        url: String,
        #[source]
        source: tokio::task::JoinError,
    },
    /// The task for this request finished without handing back a result.
    #[error("GET {url}: no result was delivered")]
    Lost { url: String },
}

impl FetchError {
    /// URL the failed request targeted, when one was known.
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::InvalidUrl { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::Decode { url, .. }
            | FetchError::Join { url, .. }
            | FetchError::Lost { url } => Some(url),
            FetchError::EmptyCollection => None,
        }
    }

    /// True for transport-level failures (as opposed to a bad body or bad input).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::Transport { .. } | FetchError::Join { .. } | FetchError::Lost { .. }
        )
    }
}
