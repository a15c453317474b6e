//! Site-level probes
//!
//! Besides the page itself an analysis looks at three resources of the
//! site: the TLS certificate on port 443, `/robots.txt`, and `/sitemap.xml`.
//! Each probe runs once per analysis, in that order, with its own timeout.
//! A failed probe produces a value describing the failure; it never aborts
//! the analysis.

mod robots;
mod sitemap;
mod ssl;

pub use robots::{check_robots, ParsedRobots, RobotsReport, WILDCARD_AGENT};
pub use sitemap::{
    check_sitemap, parse_sitemap, SitemapReport, SITEMAP_NAMESPACE, SITEMAP_PREVIEW_LEN,
};
pub use ssl::{build_tls_client, check_ssl, parse_certificate, SslInfo, HTTPS_PORT};

use crate::config::HttpConfig;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Results of the site probes for one analysis
#[derive(Debug, Clone, PartialEq)]
pub struct SiteChecks {
    pub ssl: SslInfo,
    pub robots: RobotsReport,
    pub sitemap: SitemapReport,
}

/// Runs the site probes
pub struct SiteProber {
    client: Client,
    tls_client: Client,
    timeout: Duration,
    ssl_port: u16,
}

impl SiteProber {
    /// Creates a prober sharing `client` for robots.txt and sitemap.xml
    pub fn new(client: Client, config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client,
            tls_client: build_tls_client(config, &[])?,
            timeout: config.probe_timeout(),
            ssl_port: HTTPS_PORT,
        })
    }

    /// Overrides the port of the certificate check
    pub fn with_ssl_port(mut self, port: u16) -> Self {
        self.ssl_port = port;
        self
    }

    /// Probes the site `page_url` belongs to
    pub async fn check_all(&self, page_url: &Url) -> SiteChecks {
        let ssl = match page_url.host_str() {
            Some(host) => check_ssl(&self.tls_client, host, self.ssl_port).await,
            None => SslInfo::insecure("URL has no host"),
        };
        let robots = check_robots(&self.client, page_url, self.timeout).await;
        let sitemap = check_sitemap(&self.client, page_url, self.timeout).await;

        tracing::info!(
            "Site checks for {}: secure={}, robots={}, sitemap={}",
            page_url,
            ssl.secure,
            matches!(robots, RobotsReport::Available { .. }),
            matches!(sitemap, SitemapReport::Available { .. })
        );

        SiteChecks {
            ssl,
            robots,
            sitemap,
        }
    }
}
