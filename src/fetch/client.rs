use crate::config::HttpConfig;
use reqwest::{redirect::Policy, Client};

/// Builds an HTTP client with proper configuration
///
/// The client follows redirects up to `max-redirects` hops, decompresses
/// gzip and brotli bodies, and applies the page timeout as its default.
/// Probes override the timeout per request.
///
/// # Example
///
/// ```no_run
/// use seo_scope::config::HttpConfig;
/// use seo_scope::fetch::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.page_timeout())
        .connect_timeout(config.page_timeout())
        .redirect(Policy::limited(config.max_redirects))
        .use_rustls_tls()
        .gzip(true)
        .brotli(true)
        .build()
}
