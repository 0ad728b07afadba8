//! slexy.org scraper.
//!
//! `/recent` links each paste as `/view/<id>`; the raw body lives at
//! `/raw/<id>`.

use super::{PasteSite, link_path};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const DEFAULT_BASE: &str = "http://slexy.org/";

static LINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"/view(.*?)">"#).expect("slexy link pattern is valid"));

#[derive(Debug, Clone)]
pub struct Slexy {
    base: Url,
    listing: Url,
}

impl Slexy {
    pub fn new() -> Result<Self, url::ParseError> {
        Self::with_base(Url::parse(DEFAULT_BASE)?)
    }

    /// Point the scraper at another origin serving the same layout.
    pub fn with_base(base: Url) -> Result<Self, url::ParseError> {
        let listing = base.join("recent")?;
        Ok(Self { base, listing })
    }
}

impl PasteSite for Slexy {
    fn name(&self) -> &'static str {
        "slexy"
    }

    fn listing_url(&self) -> &Url {
        &self.listing
    }

    fn locate_fragments<'a>(&self, listing: &'a str) -> Vec<&'a str> {
        LINK_PATTERN.find_iter(listing).map(|m| m.as_str()).collect()
    }

    fn derive_document_url(&self, fragment: &str) -> Option<Url> {
        let path = link_path(fragment.split("/view").nth(1)?, "\">")?;
        self.base.join(&format!("raw{path}")).ok()
    }
}
