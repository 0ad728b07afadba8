//! # Paste Mail Harvester
//!
//! Polls public paste sites for freshly posted documents, scans them for
//! email addresses, and appends every plausible address to a log file.
//!
//! ## Usage
//!
//! ```sh
//! paste_mail_harvester -o mails.log --verbose
//! ```
//!
//! ## Architecture
//!
//! The harvester runs in rounds, forever:
//! 1. **Listing**: every enabled site's recent-pastes page is fetched, one task per site
//! 2. **Documents**: each linked paste is fetched in listing order
//! 3. **Extraction**: email-shaped tokens are filtered for filenames and known noise
//! 4. **Output**: survivors are appended to the shared log (and echoed to stdout)
//!
//! Diagnostics go to stderr through `tracing`; `RUST_LOG` overrides the level
//! (e.g. `RUST_LOG=debug` to trace every fetch).

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod errors;
mod extract;
mod fetch;
mod filter;
mod models;
mod outputs;
mod poll;
mod scrapers;
mod utils;

use cli::Cli;
use extract::Extractor;
use fetch::HttpFetcher;
use outputs::mail_log::MailLog;
use poll::Harvester;

/// Log filter used when `RUST_LOG` is unset.
///
/// `--verbose` does not touch it: verbose reports are `info!` events, so the
/// diagnostic stream stays one line per report. Per-fetch traces need
/// `RUST_LOG=debug`.
pub(crate) fn default_log_filter() -> EnvFilter {
    EnvFilter::new("info")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let settings = Cli::parse().into_settings();

    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_log_filter());
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    if settings.sources.is_empty() {
        error!("No sources enabled");
        return Err("no sources enabled; enable at least one of --pastebin, --debian, --slexy".into());
    }

    let sink = match MailLog::open(&settings.log_path, settings.echo).await {
        Ok(sink) => Arc::new(sink),
        Err(e) => {
            error!(path = %settings.log_path.display(), error = %e, "Failed to open mail log");
            return Err(e.into());
        }
    };

    let sites = scrapers::build_sites(&settings.sources)?;
    info!(
        path = %settings.log_path.display(),
        sources = ?settings.sources,
        echo = settings.echo,
        verbose = settings.verbose,
        "Harvester starting"
    );

    let extractor = Arc::new(Extractor::new(sink, settings.verbose));
    let harvester = Harvester::new(
        sites,
        Arc::new(HttpFetcher::new()),
        extractor,
        settings.verbose,
    );
    harvester.run().await;

    Ok(())
}
