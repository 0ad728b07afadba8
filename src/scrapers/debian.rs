//! paste.debian.net scraper.
//!
//! The front page carries a "recent pastes" list with protocol-relative links:
//!
//! ```text
//! <li><a href='//paste.debian.net/1234567/'>Untitled</a></li>
//! ```

use super::{PasteSite, link_path};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const DEFAULT_BASE: &str = "http://paste.debian.net/";
const HOST: &str = "paste.debian.net";

static LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<li><a href='//paste\.debian\.net(.*?)'>").expect("debian link pattern is valid")
});

#[derive(Debug, Clone)]
pub struct Debian {
    base: Url,
}

impl Debian {
    pub fn new() -> Result<Self, url::ParseError> {
        Ok(Self::with_base(Url::parse(DEFAULT_BASE)?))
    }

    /// Point the scraper at another origin serving the same layout.
    pub fn with_base(base: Url) -> Self {
        Self { base }
    }
}

impl PasteSite for Debian {
    fn name(&self) -> &'static str {
        "debian"
    }

    fn listing_url(&self) -> &Url {
        &self.base
    }

    fn locate_fragments<'a>(&self, listing: &'a str) -> Vec<&'a str> {
        LINK_PATTERN.find_iter(listing).map(|m| m.as_str()).collect()
    }

    fn derive_document_url(&self, fragment: &str) -> Option<Url> {
        let target = fragment.split("<li><a href='//").nth(1)?;
        let path = link_path(target.strip_prefix(HOST)?, "'>")?;
        self.base.join(&path).ok()
    }
}
