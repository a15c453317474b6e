//! TLS certificate probe
//!
//! Opens an HTTPS connection to the page's host and reads the peer
//! certificate from the established session. Any failure is reported as an
//! insecure result, never as an error.

use crate::config::HttpConfig;
use chrono::{DateTime, Utc};
use reqwest::{redirect::Policy, tls::TlsInfo, Certificate, Client};
use x509_parser::parse_x509_certificate;

/// Port the certificate check connects to
pub const HTTPS_PORT: u16 = 443;

/// Outcome of the certificate probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SslInfo {
    /// True when a TLS session was established with a trusted certificate
    pub secure: bool,

    /// Certificate `notAfter`
    pub expiry: Option<DateTime<Utc>>,

    /// Issuer attributes such as `commonName` and `organizationName`
    pub issuer: Vec<(String, String)>,

    /// Why the site is considered insecure, or why details are missing
    pub error: Option<String>,
}

impl SslInfo {
    pub fn insecure(reason: impl Into<String>) -> Self {
        Self {
            secure: false,
            expiry: None,
            issuer: Vec::new(),
            error: Some(reason.into()),
        }
    }

    /// Whole days from `now` until the certificate expires
    ///
    /// Negative once the certificate has expired.
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expiry.map(|expiry| (expiry - now).num_days())
    }
}

/// Builds the client used for the certificate probe
///
/// Redirects are disabled so the certificate always belongs to the probed
/// host, and TLS session details are exposed on responses. `extra_roots` are
/// trusted in addition to the bundled web PKI roots.
pub fn build_tls_client(
    config: &HttpConfig,
    extra_roots: &[Certificate],
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.probe_timeout())
        .connect_timeout(config.probe_timeout())
        .redirect(Policy::none())
        .use_rustls_tls()
        .tls_info(true);

    for root in extra_roots {
        builder = builder.add_root_certificate(root.clone());
    }

    builder.build()
}

/// Checks the certificate served at `host:port`
pub async fn check_ssl(client: &Client, host: &str, port: u16) -> SslInfo {
    let target = format!("https://{}:{}/", host, port);
    tracing::debug!("Checking TLS certificate at {}", target);

    let response = match client.head(&target).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("TLS check failed for {}: {}", host, e);
            return SslInfo::insecure(format!("TLS connection failed: {}", e));
        }
    };

    let certificate = response
        .extensions()
        .get::<TlsInfo>()
        .and_then(|info| info.peer_certificate());

    match certificate {
        Some(der) => parse_certificate(der),
        None => SslInfo {
            secure: true,
            expiry: None,
            issuer: Vec::new(),
            error: Some("peer certificate unavailable".to_string()),
        },
    }
}

/// Reads expiry and issuer from a DER-encoded certificate
///
/// The handshake has already succeeded when this runs, so a certificate that
/// cannot be decoded still counts as secure.
pub fn parse_certificate(der: &[u8]) -> SslInfo {
    let cert = match parse_x509_certificate(der) {
        Ok((_, cert)) => cert,
        Err(e) => {
            tracing::debug!("Could not decode peer certificate: {}", e);
            return SslInfo {
                secure: true,
                expiry: None,
                issuer: Vec::new(),
                error: Some(format!("certificate could not be decoded: {}", e)),
            };
        }
    };

    let expiry = DateTime::<Utc>::from_timestamp(cert.validity().not_after.timestamp(), 0);

    let name = cert.issuer();
    let mut issuer = Vec::new();
    for (label, values) in [
        ("countryName", name.iter_country().collect::<Vec<_>>()),
        ("organizationName", name.iter_organization().collect()),
        ("commonName", name.iter_common_name().collect()),
    ] {
        for value in values {
            if let Ok(text) = value.as_str() {
                issuer.push((label.to_string(), text.to_string()));
            }
        }
    }

    SslInfo {
        secure: true,
        expiry,
        issuer,
        error: None,
    }
}
