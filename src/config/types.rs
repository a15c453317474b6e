use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Browser user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for seo-scope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Timeout for the analyzed page fetch (seconds)
    #[serde(rename = "page-timeout-secs")]
    pub page_timeout_secs: u64,

    /// Timeout for robots.txt, sitemap.xml and the certificate probe (seconds)
    #[serde(rename = "probe-timeout-secs")]
    pub probe_timeout_secs: u64,

    /// Maximum number of redirects followed for a single request
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// User agent header value
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl HttpConfig {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            page_timeout_secs: 10,
            probe_timeout_secs: 10,
            max_redirects: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that relative report filenames are written into
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}
