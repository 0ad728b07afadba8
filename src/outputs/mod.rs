//! Output sinks for harvested addresses.
//!
//! # Submodules
//!
//! - [`mail_log`]: the append-only log shared by every source, with optional
//!   stdout echo
//!
//! # Output Format
//!
//! ```text
//! crawler<id>.log
//! ├── alice@example.com      # batch from one document
//! ├── bob@example.org
//! └── carol@example.net      # next batch, possibly from another source
//! ```
//!
//! No header, no dedup: restarts keep appending to the same file.

pub mod mail_log;
