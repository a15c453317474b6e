//! seo-scope: a single-page SEO inspector
//!
//! This crate fetches one web page, extracts its on-page SEO signals, probes
//! the site's certificate, robots.txt and sitemap, and writes a plain-text
//! report with prioritized improvement suggestions.

pub mod config;
pub mod extract;
pub mod fetch;
pub mod probe;
pub mod report;
pub mod session;
pub mod suggest;
pub mod url;

use thiserror::Error;

/// Main error type for seo-scope operations
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    UrlError(#[from] UrlError),

    #[error(transparent)]
    Report(#[from] report::OutputError),

    #[error("HTTP client could not be built")]
    Client(#[from] reqwest::Error),

    #[error("Terminal I/O failed")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Empty input")]
    Empty,
}

/// Errors raised by the primary page fetch
///
/// Any of these aborts the current analysis. Secondary probes never produce
/// a `FetchError`; see [`probe`]. Messages leave the underlying transport
/// error to [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String, source: reqwest::Error },

    #[error("Too many redirects from {url}")]
    RedirectLimit { url: String },

    #[error("Could not decode response body from {url}")]
    Body { url: String, source: reqwest::Error },

    #[error("HTTP error for {url}")]
    Http { url: String, source: reqwest::Error },
}

/// Result type alias for seo-scope operations
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::Page;
pub use fetch::PageSnapshot;
pub use probe::SiteChecks;
pub use suggest::{Finding, Priority, Suggestions};
