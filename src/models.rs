//! Data models shared across the harvester.
//!
//! - [`Settings`]: immutable configuration built once from the command line
//! - [`SourceKind`]: the paste sites the harvester knows how to crawl
//! - [`SourceReport`] / [`RoundOutcome`]: what one source did during a round

use std::fmt;
use std::path::PathBuf;

/// Process-wide configuration.
///
/// Constructed once at startup and handed to components by shared reference;
/// nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Append-only log receiving one address per line.
    pub log_path: PathBuf,
    /// Echo every written batch to stdout.
    pub echo: bool,
    /// Report empty listings and documents without addresses.
    pub verbose: bool,
    /// Sources polled every round, in launch order.
    pub sources: Vec<SourceKind>,
}

/// A paste site the harvester can poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// pastebin.com
    Pastebin,
    /// paste.debian.net
    Debian,
    /// slexy.org
    Slexy,
}

impl SourceKind {
    pub fn name(self) -> &'static str {
        match self {
            SourceKind::Pastebin => "pastebin",
            SourceKind::Debian => "debian",
            SourceKind::Slexy => "slexy",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a source's round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Every discovered document was fetched and scanned.
    Completed,
    /// The listing page held no document links.
    NoFragments,
    /// The listing page could not be fetched.
    ListingUnavailable,
    /// A link did not have the expected shape; the rest of the round was dropped.
    MalformedFragment,
    /// A document could not be fetched; the rest of the round was dropped.
    DocumentUnavailable,
}

impl RoundOutcome {
    /// Whether the round was cut short by a failure.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            RoundOutcome::ListingUnavailable
                | RoundOutcome::MalformedFragment
                | RoundOutcome::DocumentUnavailable
        )
    }
}

/// Result of running one source for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    /// Site name, as used in diagnostics.
    pub site: &'static str,
    /// Documents fetched and handed to the extractor.
    pub documents: usize,
    /// Addresses successfully written to the sink from those documents.
    pub addresses: usize,
    pub outcome: RoundOutcome,
}
