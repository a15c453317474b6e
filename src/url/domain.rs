use crate::UrlError;
use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (`mailto:`, `javascript:` and similar), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seo_scope::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(extract_domain(&url), None);
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true when both URLs carry the same host
///
/// Ports and schemes are ignored. A URL without a host never matches.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Builds the URL of a well-known resource at the origin of `url`
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seo_scope::url::origin_resource;
///
/// let url = Url::parse("https://example.com:8443/blog/post?id=1").unwrap();
/// let robots = origin_resource(&url, "robots.txt").unwrap();
/// assert_eq!(robots.as_str(), "https://example.com:8443/robots.txt");
/// ```
pub fn origin_resource(url: &Url, resource: &str) -> Result<Url, UrlError> {
    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    let origin = url.origin().ascii_serialization();
    Url::parse(&format!("{}/{}", origin, resource.trim_start_matches('/')))
        .map_err(|e| UrlError::Parse(e.to_string()))
}
