//! Command-line interface definitions for the harvester.
//!
//! Flags are parsed once at startup with `clap` and folded into an immutable
//! [`Settings`] value that every component receives by reference.

use crate::models::{Settings, SourceKind};
use crate::utils::to_base36;
use chrono::Utc;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Command-line arguments for the harvester.
///
/// Boolean switches that default to `true` take an explicit value so they can
/// be turned off, e.g. `--slexy false`.
///
/// # Examples
///
/// ```sh
/// # Crawl every source, echo addresses to stdout
/// paste_mail_harvester
///
/// # Only pastebin, quiet console, custom log file
/// paste_mail_harvester -o mails.log --stdout false --debian false --slexy false
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// File to save the collected mails
    #[arg(short = 'o', value_name = "FILE", default_value_os_t = default_log_path())]
    pub output: PathBuf,

    /// Print collected mails to stdout
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub stdout: bool,

    /// Verbose mode
    #[arg(long)]
    pub verbose: bool,

    /// Crawl pastebin.com
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub pastebin: bool,

    /// Crawl paste.debian.net
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub debian: bool,

    /// Crawl slexy.org
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub slexy: bool,
}

impl Cli {
    /// Fold the parsed flags into the settings shared by the harvester.
    pub fn into_settings(self) -> Settings {
        let sources = [
            (self.pastebin, SourceKind::Pastebin),
            (self.debian, SourceKind::Debian),
            (self.slexy, SourceKind::Slexy),
        ]
        .into_iter()
        .filter_map(|(enabled, kind)| enabled.then_some(kind))
        .collect();

        Settings {
            log_path: self.output,
            echo: self.stdout,
            verbose: self.verbose,
            sources,
        }
    }
}

/// Build the default output file name, `crawler<nanos in base 36>.log`.
pub fn default_log_path() -> PathBuf {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    PathBuf::from(format!("crawler{}.log", to_base36(nanos.unsigned_abs())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["paste_mail_harvester"]);

        assert!(cli.stdout);
        assert!(!cli.verbose);
        assert!(cli.pastebin && cli.debian && cli.slexy);

        let name = cli.output.to_string_lossy().into_owned();
        assert!(name.starts_with("crawler"));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "paste_mail_harvester",
            "-o",
            "/tmp/mails.log",
            "--stdout",
            "false",
            "--verbose",
            "--debian",
            "false",
        ]);

        assert_eq!(cli.output, PathBuf::from("/tmp/mails.log"));
        assert!(!cli.stdout);
        assert!(cli.verbose);
        assert!(!cli.debian);
    }

    #[test]
    fn test_into_settings_keeps_enabled_sources_in_order() {
        let settings = Cli::parse_from(["paste_mail_harvester", "--pastebin", "false"])
            .into_settings();

        assert_eq!(settings.sources, vec![SourceKind::Debian, SourceKind::Slexy]);
        assert!(settings.echo);
        assert!(!settings.verbose);
    }

    #[test]
    fn test_default_log_path_shape() {
        let path = default_log_path();
        let name = path.to_string_lossy();
        let stem = name
            .strip_prefix("crawler")
            .and_then(|s| s.strip_suffix(".log"))
            .unwrap();

        assert!(!stem.is_empty());
        assert!(stem.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
