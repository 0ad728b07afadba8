//! The poll loop.
//!
//! Each round spawns one task per enabled source and waits for all of them
//! before starting the next round. Sources share nothing but the fetcher and
//! the extractor's log, so a slow or failing site only delays the end of the
//! round; it never holds back the other sites' work.

use crate::extract::Extractor;
use crate::fetch::Fetch;
use crate::models::SourceReport;
use crate::scrapers::{PasteSite, SourceScraper};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, instrument};

/// Fork-join driver over a fixed set of sources.
pub struct Harvester<F> {
    scrapers: Vec<Arc<SourceScraper<F>>>,
}

impl<F: Fetch> Harvester<F> {
    pub fn new(
        sites: Vec<Arc<dyn PasteSite>>,
        fetcher: Arc<F>,
        extractor: Arc<Extractor>,
        verbose: bool,
    ) -> Self {
        let scrapers = sites
            .into_iter()
            .map(|site| {
                Arc::new(SourceScraper::new(
                    site,
                    Arc::clone(&fetcher),
                    Arc::clone(&extractor),
                    verbose,
                ))
            })
            .collect();
        Self { scrapers }
    }

    /// Run every source once, concurrently, and wait for all of them.
    ///
    /// Reports come back in source order. A task that panicked is logged and
    /// has no report.
    #[instrument(level = "debug", skip(self))]
    pub async fn run_round(&self, round: u64) -> Vec<SourceReport> {
        let t0 = Instant::now();
        let tasks = self.scrapers.iter().map(|scraper| {
            let scraper = Arc::clone(scraper);
            tokio::spawn(async move { scraper.run().await })
        });

        let reports: Vec<SourceReport> = join_all(tasks)
            .await
            .into_iter()
            .zip(&self.scrapers)
            .filter_map(|(joined, scraper)| match joined {
                Ok(report) => Some(report),
                Err(e) => {
                    error!(site = scraper.site_name(), error = %e, "Source task failed");
                    None
                }
            })
            .collect();

        debug!(
            sources = reports.len(),
            documents = reports.iter().map(|r| r.documents).sum::<usize>(),
            addresses = reports.iter().map(|r| r.addresses).sum::<usize>(),
            failed = ?reports
                .iter()
                .filter(|r| r.outcome.is_failure())
                .map(|r| r.site)
                .collect::<Vec<_>>(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Round complete"
        );
        reports
    }

    /// Poll forever, starting each round as soon as the previous one ends.
    pub async fn run(&self) {
        let mut round = 0u64;
        loop {
            round += 1;
            self.run_round(round).await;
        }
    }
}
