//! Address extraction from document bodies.
//!
//! The [`Extractor`] scans text for email-shaped tokens, runs them through the
//! [candidate filter](crate::filter), and streams the survivors straight into
//! the shared [`MailLog`].

use crate::filter;
use crate::outputs::mail_log::MailLog;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// `word-chars @ word-or-dot-chars`, ASCII only.
static MAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9A-Za-z_]+@[0-9A-Za-z_.]+").expect("mail pattern is valid")
});

/// An email-shaped match and the dotted word run it was cut from.
///
/// For `logo.png@site.x` the match is `png@site.x` while the token is the
/// whole `logo.png@site.x`, which is what reveals it as a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub address: &'a str,
    pub token: &'a str,
}

impl Candidate<'_> {
    /// Whether the candidate survives the [filter](crate::filter).
    pub fn is_fresh(&self) -> bool {
        !filter::is_artifact(self.token) && filter::keep(self.address)
    }
}

/// Every email-shaped match in `text`, leftmost-first and non-overlapping.
pub fn candidates(text: &str) -> Vec<Candidate<'_>> {
    let bytes = text.as_bytes();
    MAIL_PATTERN
        .find_iter(text)
        .map(|m| {
            let mut start = m.start();
            while start > 0 && is_token_byte(bytes[start - 1]) {
                start -= 1;
            }
            Candidate {
                address: m.as_str(),
                token: &text[start..m.end()],
            }
        })
        .collect()
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.'
}

/// Turns document bodies into log entries.
#[derive(Debug)]
pub struct Extractor {
    sink: Arc<MailLog>,
    verbose: bool,
}

impl Extractor {
    pub fn new(sink: Arc<MailLog>, verbose: bool) -> Self {
        Self { sink, verbose }
    }

    /// Scan `text`, write the fresh addresses as one batch, and return what
    /// was written.
    ///
    /// Nothing is written when no candidate survives the filter. A failed
    /// write is logged and yields an empty list.
    #[instrument(level = "debug", skip_all, fields(bytes = text.len()))]
    pub async fn extract(&self, text: &str) -> Vec<String> {
        let found = candidates(text);
        if found.is_empty() {
            if self.verbose {
                info!("no mail found");
            }
            return Vec::new();
        }

        let fresh: Vec<&str> = found
            .iter()
            .filter(|c| c.is_fresh())
            .map(|c| c.address)
            .collect();
        if fresh.is_empty() {
            return Vec::new();
        }

        let batch = fresh.iter().join("\n");
        if let Err(e) = self.sink.write(&batch).await {
            error!(error = %e, count = fresh.len(), "Failed to append addresses to mail log");
            return Vec::new();
        }
        fresh.into_iter().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::testing::Captured;
    use tempfile::TempDir;

    async fn extractor(dir: &TempDir) -> (Extractor, std::path::PathBuf) {
        verbose_extractor(dir, false).await
    }

    async fn verbose_extractor(dir: &TempDir, verbose: bool) -> (Extractor, std::path::PathBuf) {
        let path = dir.path().join("mails.log");
        let sink = Arc::new(MailLog::open(&path, false).await.unwrap());
        (Extractor::new(sink, verbose), path)
    }

    fn addresses(text: &str) -> Vec<&str> {
        candidates(text).iter().map(|c| c.address).collect()
    }

    #[test]
    fn test_candidates_in_input_order() {
        let text = "first z@a.io, then a@z.io and user@user; end.";
        assert_eq!(addresses(text), vec!["z@a.io", "a@z.io", "user@user"]);
    }

    #[test]
    fn test_candidates_match_lexical_shape() {
        let text = "x <b>jo.hn@mail.example.com</b> @nobody a@ é@x.io mix_ed@h.o.s.t.";
        let shape = Regex::new(r"^[0-9A-Za-z_]+@[0-9A-Za-z_.]+$").unwrap();

        let found = addresses(text);
        assert_eq!(found, vec!["hn@mail.example.com", "mix_ed@h.o.s.t."]);
        assert!(found.iter().all(|a| shape.is_match(a)));
    }

    #[test]
    fn test_candidate_token_includes_dotted_prefix() {
        let found = candidates("see logo.png@site.x now");
        assert_eq!(
            found,
            vec![Candidate {
                address: "png@site.x",
                token: "logo.png@site.x",
            }]
        );
        assert!(!found[0].is_fresh());
    }

    #[test]
    fn test_dotted_prefix_artifacts_reject_otherwise_valid_match() {
        // The match alone would pass; the `._` in its dotted run rejects it.
        let found = candidates("write to foo._bar@example.com");
        assert_eq!(found[0].address, "_bar@example.com");
        assert!(filter::keep(found[0].address));
        assert!(!found[0].is_fresh());
    }

    #[test]
    fn test_candidates_empty_text() {
        assert!(candidates("").is_empty());
        assert!(candidates("no addresses here").is_empty());
    }

    #[tokio::test]
    async fn test_extract_writes_only_filtered_addresses() {
        let dir = tempfile::tempdir().unwrap();
        let (extractor, path) = extractor(&dir).await;

        let fresh = extractor
            .extract("contact me at alice@example.com or see logo.png@site.x, foo@bar, user@user")
            .await;

        assert_eq!(fresh, vec!["alice@example.com"]);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "alice@example.com\n");
    }

    #[tokio::test]
    async fn test_extract_batches_multiple_addresses() {
        let dir = tempfile::tempdir().unwrap();
        let (extractor, path) = extractor(&dir).await;

        extractor
            .extract("a@example.com\nnoise\nb@example.org")
            .await;

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "a@example.com\nb@example.org\n");
    }

    #[tokio::test]
    async fn test_extract_without_fresh_addresses_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (extractor, path) = extractor(&dir).await;

        assert!(extractor.extract("foo@bar").await.is_empty());
        assert!(extractor.extract("nothing to see").await.is_empty());

        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_no_mail_report_is_verbose_only() {
        for (verbose, expected_lines) in [(true, 1), (false, 0)] {
            let dir = tempfile::tempdir().unwrap();
            let (extractor, _) = verbose_extractor(&dir, verbose).await;

            let captured = Captured::default();
            {
                let _guard = captured.install();
                assert!(extractor.extract("nothing to see here").await.is_empty());
            }

            let lines = captured.lines();
            assert_eq!(lines.len(), expected_lines, "verbose={verbose}: {lines:?}");
            if verbose {
                assert!(lines[0].contains("no mail found"));
            }
        }
    }

    #[tokio::test]
    async fn test_filter_exhaustion_is_silent_even_when_verbose() {
        let dir = tempfile::tempdir().unwrap();
        let (extractor, path) = verbose_extractor(&dir, true).await;

        let captured = Captured::default();
        {
            let _guard = captured.install();
            assert!(extractor.extract("foo@bar user@user logo.png@site.x").await.is_empty());
        }

        assert!(captured.lines().is_empty(), "{:?}", captured.lines());
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_failed_write_reports_nothing_written() {
        // Every write to /dev/full fails with ENOSPC.
        let sink = Arc::new(MailLog::open("/dev/full", false).await.unwrap());
        let extractor = Extractor::new(sink, false);

        assert!(extractor.extract("alice@example.com").await.is_empty());
    }
}
