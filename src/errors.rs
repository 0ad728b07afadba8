//! Error types for the harvesting pipeline.
//!
//! None of these escape a source's round: scrapers log them and move on.

use thiserror::Error;

/// A network retrieval that did not produce a body.
///
/// Only transport-level problems count; an HTTP error status still yields
/// whatever body the server sent.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or no response arrived.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The response arrived but its body could not be read.
    #[error("reading body of {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Failures that abandon the remainder of a source's round.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// A discovered link no longer has the shape the site grammar expects.
    #[error("can't parse {site} link {fragment:?}")]
    MalformedFragment { site: &'static str, fragment: String },
}
