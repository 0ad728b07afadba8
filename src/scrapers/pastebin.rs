//! pastebin.com scraper.
//!
//! The public archive lists recent pastes as table rows whose link follows a
//! small icon:
//!
//! ```text
//! <img src="/i/t.gif" class="i_p0" alt="" /><a href="/AbCd1234">Untitled</a>
//! ```
//!
//! The raw text of a paste is served at `/raw/<id>`.

use super::{PasteSite, link_path};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const DEFAULT_BASE: &str = "https://pastebin.com/";

static LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"class="i_p0" alt="" /><a href="(.*?)">"#).expect("pastebin link pattern is valid")
});

#[derive(Debug, Clone)]
pub struct Pastebin {
    base: Url,
    listing: Url,
}

impl Pastebin {
    pub fn new() -> Result<Self, url::ParseError> {
        Self::with_base(Url::parse(DEFAULT_BASE)?)
    }

    /// Point the scraper at another origin serving the same layout.
    pub fn with_base(base: Url) -> Result<Self, url::ParseError> {
        let listing = base.join("archive")?;
        Ok(Self { base, listing })
    }
}

impl PasteSite for Pastebin {
    fn name(&self) -> &'static str {
        "pastebin"
    }

    fn listing_url(&self) -> &Url {
        &self.listing
    }

    fn locate_fragments<'a>(&self, listing: &'a str) -> Vec<&'a str> {
        LINK_PATTERN.find_iter(listing).map(|m| m.as_str()).collect()
    }

    fn derive_document_url(&self, fragment: &str) -> Option<Url> {
        // class | i_p0" alt | " /><a href | /AbCd1234">
        let href = fragment.split("=\"").nth(3)?;
        let path = link_path(href, "\">")?;
        self.base.join(&format!("raw{path}")).ok()
    }
}
