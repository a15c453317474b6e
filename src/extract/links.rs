//! Anchor classification into internal, external, and broken targets

use crate::url::same_host;
use scraper::{Html, Selector};
use url::Url;

/// Anchor targets of a page, partitioned by where they point
///
/// "Broken" means the href could not be resolved into a URL at all; no
/// request is ever made to check whether a target is reachable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSummary {
    pub internal: Vec<Url>,
    pub external: Vec<Url>,
    pub broken: Vec<String>,
}

impl LinkSummary {
    pub fn total(&self) -> usize {
        self.internal.len() + self.external.len() + self.broken.len()
    }
}

/// Classifies every `<a href>` of the document
///
/// # Classification Rules
///
/// | Resolved target | Class |
/// |-----------------|-------|
/// | Same host as `base_url` | internal |
/// | Other host, or no host (`mailto:`, `javascript:`) | external |
/// | Resolution failed | broken (raw href kept) |
pub fn classify_links(document: &Html, base_url: &Url) -> LinkSummary {
    let mut links = LinkSummary::default();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match base_url.join(href) {
            Ok(resolved) if same_host(&resolved, base_url) => links.internal.push(resolved),
            Ok(resolved) => links.external.push(resolved),
            Err(e) => {
                tracing::debug!("Unresolvable link {:?}: {}", href, e);
                links.broken.push(href.to_string());
            }
        }
    }

    links
}
