//! Blocking-per-task page retrieval.
//!
//! The harvester only ever needs "GET this URL and give me the text". That
//! capability sits behind the [`Fetch`] trait so scrapers can be driven by a
//! canned fetcher in tests, while production uses [`HttpFetcher`].
//!
//! There are no retries and no timeout beyond the transport defaults: a
//! failed fetch is reported and the caller decides what to abandon.

use crate::errors::FetchError;
use reqwest::Client;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Retrieve the text behind a URL.
///
/// Implementations must be shareable across concurrently running scrapers.
pub trait Fetch: Send + Sync + 'static {
    /// Perform one GET and return the body text.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// [`Fetch`] implementation backed by a shared `reqwest` client.
///
/// `reqwest::Client` pools connections internally and is cheap to share, so a
/// single instance serves every source.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        debug!("fetching");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(source) => {
                let err = FetchError::Request {
                    url: url.to_string(),
                    source,
                };
                warn!(error = %err, "fetch failed");
                return Err(err);
            }
        };

        // Error statuses are not failures here; their body is scanned like any other.
        let status = response.status();
        match response.text().await {
            Ok(body) => {
                debug!(
                    %status,
                    bytes = body.len(),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "fetched"
                );
                Ok(body)
            }
            Err(source) => {
                let err = FetchError::Body {
                    url: url.to_string(),
                    source,
                };
                warn!(error = %err, "fetch failed");
                Err(err)
            }
        }
    }
}
