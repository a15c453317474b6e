//! sitemap.xml probe

use crate::url::origin_resource;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Namespace of the sitemap protocol
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Number of sitemap URLs kept for the report
pub const SITEMAP_PREVIEW_LEN: usize = 10;

/// What the sitemap.xml probe found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapReport {
    Available {
        /// Where sitemap.xml was requested
        url: String,
        /// Number of `<url>` entries with a `<loc>`
        total: usize,
        /// The first entries, in file order
        urls: Vec<String>,
    },
    Unavailable {
        url: String,
        reason: String,
    },
}

impl SitemapReport {
    pub fn unavailable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Extracts every `<url><loc>` of a sitemap document
///
/// Only elements in the sitemap namespace count. Entries without a `<loc>`
/// are skipped.
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>, roxmltree::Error> {
    let document = roxmltree::Document::parse(xml)?;

    let locations = document
        .descendants()
        .filter(|node| node.has_tag_name((SITEMAP_NAMESPACE, "url")))
        .filter_map(|url| {
            url.children()
                .find(|child| child.has_tag_name((SITEMAP_NAMESPACE, "loc")))
                .and_then(|loc| loc.text())
                .map(|text| text.trim().to_string())
        })
        .collect();

    Ok(locations)
}

/// Fetches and parses `/sitemap.xml` at the origin of `page_url`
pub async fn check_sitemap(client: &Client, page_url: &Url, timeout: Duration) -> SitemapReport {
    let sitemap_url = match origin_resource(page_url, "sitemap.xml") {
        Ok(url) => url,
        Err(e) => return SitemapReport::unavailable(page_url.as_str(), e.to_string()),
    };

    tracing::debug!("Fetching {}", sitemap_url);

    let response = match client.get(sitemap_url.clone()).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Could not fetch {}: {}", sitemap_url, e);
            return SitemapReport::unavailable(sitemap_url.as_str(), e.to_string());
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("{} returned HTTP {}", sitemap_url, status.as_u16());
        return SitemapReport::unavailable(sitemap_url.as_str(), format!("HTTP {}", status.as_u16()));
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return SitemapReport::unavailable(sitemap_url.as_str(), e.to_string()),
    };

    match parse_sitemap(&body) {
        Ok(urls) => SitemapReport::Available {
            url: sitemap_url.to_string(),
            total: urls.len(),
            urls: urls.into_iter().take(SITEMAP_PREVIEW_LEN).collect(),
        },
        Err(e) => {
            tracing::warn!("Invalid sitemap at {}: {}", sitemap_url, e);
            SitemapReport::unavailable(sitemap_url.as_str(), format!("invalid XML: {}", e))
        }
    }
}
