//! On-page signal extraction
//!
//! A [`Page`] wraps one [`PageSnapshot`] and its parsed document. Each
//! accessor computes its signal on first use and caches it for the lifetime
//! of the page, so the markup is parsed once and every signal of a run comes
//! from the same snapshot.

mod headings;
mod images;
mod links;
mod meta;
mod structured;
mod text;

pub use headings::{extract_headings, HeadingLevel, Headings, HEADING_LEVELS};
pub use images::{extract_images, missing_alt_count, ImageInfo};
pub use links::{classify_links, LinkSummary};
pub use meta::{extract_head_meta, extract_mobile_info, HeadMeta, MobileInfo};
pub use structured::{extract_open_graph, extract_schema_org};
pub use text::{
    keyword_density, visible_text, word_count, KeywordDensity, MAX_KEYWORDS,
    MIN_KEYWORD_CHARS, MIN_KEYWORD_OCCURRENCES,
};

use crate::fetch::PageSnapshot;
use scraper::Html;
use serde_json::Value;
use std::cell::OnceCell;
use std::time::Duration;
use url::Url;

/// A fetched page and its lazily computed SEO signals
#[derive(Debug)]
pub struct Page {
    snapshot: PageSnapshot,
    document: Html,
    head: OnceCell<HeadMeta>,
    mobile: OnceCell<MobileInfo>,
    headings: OnceCell<Headings>,
    links: OnceCell<LinkSummary>,
    images: OnceCell<Vec<ImageInfo>>,
    text: OnceCell<String>,
    word_count: OnceCell<usize>,
    keywords: OnceCell<Vec<KeywordDensity>>,
    schema_org: OnceCell<Vec<Value>>,
    open_graph: OnceCell<Vec<(String, Option<String>)>>,
}

impl Page {
    /// Parses the snapshot's markup
    pub fn parse(snapshot: PageSnapshot) -> Self {
        let document = Html::parse_document(&snapshot.body);
        Self {
            snapshot,
            document,
            head: OnceCell::new(),
            mobile: OnceCell::new(),
            headings: OnceCell::new(),
            links: OnceCell::new(),
            images: OnceCell::new(),
            text: OnceCell::new(),
            word_count: OnceCell::new(),
            keywords: OnceCell::new(),
            schema_org: OnceCell::new(),
            open_graph: OnceCell::new(),
        }
    }

    /// Builds a page from markup already in hand
    pub fn from_html(url: Url, html: &str, load_time: Duration) -> Self {
        Self::parse(PageSnapshot::from_html(url, html, load_time))
    }

    pub fn snapshot(&self) -> &PageSnapshot {
        &self.snapshot
    }

    /// URL links are resolved against: the final URL after redirects
    pub fn url(&self) -> &Url {
        &self.snapshot.final_url
    }

    pub fn load_time(&self) -> Duration {
        self.snapshot.elapsed
    }

    fn head(&self) -> &HeadMeta {
        self.head.get_or_init(|| extract_head_meta(&self.document))
    }

    pub fn title(&self) -> Option<&str> {
        self.head().title.as_deref()
    }

    pub fn meta_description(&self) -> Option<&str> {
        self.head().description.as_deref()
    }

    pub fn meta_keywords(&self) -> Option<&str> {
        self.head().keywords.as_deref()
    }

    pub fn canonical_url(&self) -> Option<&str> {
        self.head().canonical.as_deref()
    }

    pub fn robots_meta(&self) -> Option<&str> {
        self.head().robots.as_deref()
    }

    pub fn favicon(&self) -> Option<&str> {
        self.head().favicon.as_deref()
    }

    pub fn mobile_info(&self) -> &MobileInfo {
        self.mobile.get_or_init(|| extract_mobile_info(&self.document))
    }

    pub fn headings(&self) -> &Headings {
        self.headings.get_or_init(|| extract_headings(&self.document))
    }

    pub fn links(&self) -> &LinkSummary {
        self.links
            .get_or_init(|| classify_links(&self.document, &self.snapshot.final_url))
    }

    pub fn images(&self) -> &[ImageInfo] {
        self.images.get_or_init(|| extract_images(&self.document))
    }

    fn text(&self) -> &str {
        self.text.get_or_init(|| visible_text(&self.document))
    }

    pub fn word_count(&self) -> usize {
        *self.word_count.get_or_init(|| word_count(self.text()))
    }

    pub fn keyword_density(&self) -> &[KeywordDensity] {
        self.keywords.get_or_init(|| keyword_density(self.text()))
    }

    pub fn schema_org_blocks(&self) -> &[Value] {
        self.schema_org
            .get_or_init(|| extract_schema_org(&self.document))
    }

    pub fn open_graph_tags(&self) -> &[(String, Option<String>)] {
        self.open_graph
            .get_or_init(|| extract_open_graph(&self.document))
    }
}
