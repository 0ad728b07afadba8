//! Paste site scrapers.
//!
//! Each site contributes only its grammar: where the listing lives, how to
//! spot document links in it, and how to turn a link into a raw-text URL.
//! That grammar is the [`PasteSite`] trait. The crawling procedure itself is
//! shared by every site and lives in [`SourceScraper`].
//!
//! # Supported Sources
//!
//! | Source | Module | Listing | Documents |
//! |--------|--------|---------|-----------|
//! | pastebin.com | [`pastebin`] | `/archive` | `/raw/<id>` |
//! | paste.debian.net | [`debian`] | `/` | `/<id>` |
//! | slexy.org | [`slexy`] | `/recent` | `/raw/<id>` |
//!
//! Link discovery is regex-based and therefore tied to each site's current
//! markup; a layout change only touches that site's module.

pub mod debian;
pub mod pastebin;
pub mod slexy;

use crate::errors::ScrapeError;
use crate::extract::Extractor;
use crate::fetch::Fetch;
use crate::models::{RoundOutcome, SourceKind, SourceReport};
use crate::utils::truncate_for_log;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Site-specific grammar for discovering documents.
pub trait PasteSite: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Page listing recently posted documents.
    fn listing_url(&self) -> &Url;

    /// Document link fragments in `listing`, in page order.
    fn locate_fragments<'a>(&self, listing: &'a str) -> Vec<&'a str>;

    /// Raw-text URL for one fragment, or `None` if the fragment does not
    /// have the expected shape.
    fn derive_document_url(&self, fragment: &str) -> Option<Url>;
}

/// Build the grammar for each enabled source, in the given order.
pub fn build_sites(kinds: &[SourceKind]) -> Result<Vec<Arc<dyn PasteSite>>, url::ParseError> {
    kinds
        .iter()
        .map(|kind| -> Result<Arc<dyn PasteSite>, url::ParseError> {
            let site: Arc<dyn PasteSite> = match kind {
                SourceKind::Pastebin => Arc::new(pastebin::Pastebin::new()?),
                SourceKind::Debian => Arc::new(debian::Debian::new()?),
                SourceKind::Slexy => Arc::new(slexy::Slexy::new()?),
            };
            Ok(site)
        })
        .collect()
}

/// Crawls one site for one round at a time.
pub struct SourceScraper<F> {
    site: Arc<dyn PasteSite>,
    fetcher: Arc<F>,
    extractor: Arc<Extractor>,
    verbose: bool,
}

impl<F: Fetch> SourceScraper<F> {
    pub fn new(
        site: Arc<dyn PasteSite>,
        fetcher: Arc<F>,
        extractor: Arc<Extractor>,
        verbose: bool,
    ) -> Self {
        Self {
            site,
            fetcher,
            extractor,
            verbose,
        }
    }

    pub fn site_name(&self) -> &'static str {
        self.site.name()
    }

    /// Run one round: fetch the listing, then every linked document in order.
    ///
    /// The first malformed link or failed document fetch ends the round for
    /// this site; documents already scanned stay written. Never fails: the
    /// outcome is carried in the returned report.
    #[instrument(level = "info", skip_all, fields(site = self.site.name()))]
    pub async fn run(&self) -> SourceReport {
        let mut report = SourceReport {
            site: self.site.name(),
            documents: 0,
            addresses: 0,
            outcome: RoundOutcome::Completed,
        };

        let listing_url = self.site.listing_url();
        let listing = match self.fetcher.fetch(listing_url.as_str()).await {
            Ok(page) => page,
            Err(e) => {
                debug!(error = %e, "Listing unavailable; skipping round");
                report.outcome = RoundOutcome::ListingUnavailable;
                return report;
            }
        };

        let fragments = self.site.locate_fragments(&listing);
        if fragments.is_empty() {
            if self.verbose {
                info!(url = %listing_url, "no raw link found");
            }
            report.outcome = RoundOutcome::NoFragments;
            return report;
        }
        debug!(count = fragments.len(), "Located document links");

        for fragment in fragments {
            match self.fetch_document(fragment).await {
                Ok(body) => {
                    report.documents += 1;
                    report.addresses += self.extractor.extract(&body).await.len();
                }
                Err(e @ ScrapeError::MalformedFragment { .. }) => {
                    warn!(error = %e, "Abandoning round");
                    report.outcome = RoundOutcome::MalformedFragment;
                    return report;
                }
                Err(ScrapeError::Fetch(e)) => {
                    debug!(error = %e, "Document unavailable; abandoning round");
                    report.outcome = RoundOutcome::DocumentUnavailable;
                    return report;
                }
            }
        }

        report
    }

    async fn fetch_document(&self, fragment: &str) -> Result<String, ScrapeError> {
        let url = self.site.derive_document_url(fragment).ok_or_else(|| {
            ScrapeError::MalformedFragment {
                site: self.site.name(),
                fragment: truncate_for_log(fragment, 120),
            }
        })?;
        Ok(self.fetcher.fetch(url.as_str()).await?)
    }
}

/// Strip `marker` and require what is left to look like an absolute path.
///
/// Shared by the site grammars, which all end in "take this piece of the
/// link and append it to a base URL".
pub(crate) fn link_path(piece: &str, marker: &str) -> Option<String> {
    let path = piece.replace(marker, "");
    let valid = path.len() > 1
        && path.starts_with('/')
        && !path.starts_with("//")
        && !path.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'');
    valid.then_some(path)
}
