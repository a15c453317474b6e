//! robots.txt probe
//!
//! Fetches `/robots.txt` at the page's origin and answers two questions:
//! may a wildcard crawler fetch the analyzed URL, and which sitemaps does the
//! file declare. Matching uses the robotstxt crate.

use crate::url::origin_resource;
use reqwest::{Client, StatusCode};
use robotstxt::DefaultMatcher;
use std::time::Duration;
use url::Url;

/// Agent the crawlability verdict is computed for
pub const WILDCARD_AGENT: &str = "*";

/// How the fetched file governs access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    /// Evaluate the rules in `content`
    Rules,
    /// The server denied access to robots.txt itself
    DisallowAll,
    /// No robots.txt exists
    AllowAll,
}

/// Parsed robots.txt data
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    content: String,
    access: Access,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            access: Access::Rules,
        }
    }

    /// Permissive rules, used when the file does not exist
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            access: Access::AllowAll,
        }
    }

    /// Denying rules, used when the server refuses access to the file
    pub fn disallow_all() -> Self {
        Self {
            content: String::new(),
            access: Access::DisallowAll,
        }
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    /// * `user_agent` - The user agent product token, `*` for any crawler
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        match self.access {
            Access::AllowAll => true,
            Access::DisallowAll => false,
            Access::Rules if self.content.trim().is_empty() => true,
            Access::Rules => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
            }
        }
    }

    /// `Sitemap:` URLs in file order
    pub fn sitemaps(&self) -> Vec<String> {
        directives(&self.content)
            .filter(|(key, value)| key == "sitemap" && !value.is_empty())
            .map(|(_, value)| value.to_string())
            .collect()
    }

    /// Crawl delay of the `*` group, in seconds
    ///
    /// Groups naming specific crawlers are ignored. The first valid value
    /// wins.
    pub fn crawl_delay(&self) -> Option<f64> {
        // Consecutive User-agent lines form one group; any rule ends the
        // run so the next User-agent starts a new group.
        let mut wildcard_group = false;
        let mut in_rules = false;

        for (key, value) in directives(&self.content) {
            match key.as_str() {
                "user-agent" => {
                    if in_rules {
                        wildcard_group = false;
                        in_rules = false;
                    }
                    wildcard_group |= value == WILDCARD_AGENT;
                }
                "sitemap" => {}
                "crawl-delay" => {
                    in_rules = true;
                    if wildcard_group {
                        if let Ok(delay) = value.parse::<f64>() {
                            return Some(delay);
                        }
                    }
                }
                _ => in_rules = true,
            }
        }

        None
    }
}

/// Iterates `key: value` lines, keys lower-cased, comments stripped
fn directives(content: &str) -> impl Iterator<Item = (String, &str)> {
    content.lines().filter_map(|line| {
        let line = line.split('#').next().unwrap_or_default().trim();
        let (key, value) = line.split_once(':')?;
        Some((key.trim().to_lowercase(), value.trim()))
    })
}

/// What the robots.txt probe found
#[derive(Debug, Clone, PartialEq)]
pub enum RobotsReport {
    Available {
        /// Where robots.txt was requested
        url: String,
        /// Whether `*` may fetch the analyzed URL
        can_fetch: bool,
        /// Declared sitemap URLs
        sitemaps: Vec<String>,
        /// Crawl delay for `*`, in seconds
        crawl_delay: Option<f64>,
    },
    Unavailable {
        url: String,
        reason: String,
    },
}

impl RobotsReport {
    pub fn unavailable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            url: url.into(),
            reason: reason.into(),
        }
    }

    fn from_robots(url: &Url, robots: &ParsedRobots, page_url: &Url) -> Self {
        Self::Available {
            url: url.to_string(),
            can_fetch: robots.is_allowed(page_url.as_str(), WILDCARD_AGENT),
            sitemaps: robots.sitemaps(),
            crawl_delay: robots.crawl_delay(),
        }
    }
}

/// Fetches and evaluates robots.txt for `page_url`
///
/// # Status Handling
///
/// | Response | Result |
/// |----------|--------|
/// | 2xx | rules evaluated |
/// | 401, 403 | everything disallowed |
/// | other 4xx | everything allowed |
/// | 5xx, network or decode failure | `Unavailable` |
pub async fn check_robots(client: &Client, page_url: &Url, timeout: Duration) -> RobotsReport {
    let robots_url = match origin_resource(page_url, "robots.txt") {
        Ok(url) => url,
        Err(e) => return RobotsReport::unavailable(page_url.as_str(), e.to_string()),
    };

    tracing::debug!("Fetching {}", robots_url);

    let response = match client.get(robots_url.clone()).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Could not fetch {}: {}", robots_url, e);
            return RobotsReport::unavailable(robots_url.as_str(), e.to_string());
        }
    };

    let status = response.status();
    let robots = if status.is_success() {
        match response.text().await {
            Ok(body) => ParsedRobots::from_content(&body),
            Err(e) => {
                tracing::warn!("Could not read {}: {}", robots_url, e);
                return RobotsReport::unavailable(robots_url.as_str(), e.to_string());
            }
        }
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        ParsedRobots::disallow_all()
    } else if status.is_client_error() {
        ParsedRobots::allow_all()
    } else {
        tracing::warn!("{} returned HTTP {}", robots_url, status.as_u16());
        return RobotsReport::unavailable(
            robots_url.as_str(),
            format!("HTTP {}", status.as_u16()),
        );
    };

    RobotsReport::from_robots(&robots_url, &robots, page_url)
}
