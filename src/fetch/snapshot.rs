use crate::FetchError;
use chrono::{DateTime, Local};
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// The result of fetching the analyzed page once
///
/// Every signal of an analysis run is derived from one snapshot; nothing
/// re-fetches the page afterwards.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    /// URL the user asked for
    pub requested_url: Url,

    /// URL after following redirects
    pub final_url: Url,

    /// HTTP status code of the final response
    pub status_code: u16,

    /// Decoded response body
    pub body: String,

    /// Time from sending the request to the end of the body
    pub elapsed: Duration,

    /// When the request was sent
    pub fetched_at: DateTime<Local>,
}

impl PageSnapshot {
    /// Builds a snapshot from markup that was obtained some other way
    pub fn from_html(url: Url, body: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            requested_url: url.clone(),
            final_url: url,
            status_code: 200,
            body: body.into(),
            elapsed,
            fetched_at: Local::now(),
        }
    }

    /// Fetch duration in fractional seconds
    pub fn load_time_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Returns true when redirects moved the page to another URL
    pub fn was_redirected(&self) -> bool {
        self.requested_url != self.final_url
    }
}

/// Fetches the analyzed page
///
/// Non-2xx responses are not errors: their body is still analyzed and the
/// status is kept on the snapshot.
///
/// # Error Classification
///
/// | Condition | Error |
/// |-----------|-------|
/// | Request or body read timed out | `Timeout` |
/// | Redirect limit exceeded | `RedirectLimit` |
/// | Connection refused, DNS or TLS failure | `Connect` |
/// | Body could not be read or decoded | `Body` |
/// | Anything else | `Http` |
pub async fn fetch_page(client: &Client, url: &Url) -> Result<PageSnapshot, FetchError> {
    tracing::debug!("Fetching {}", url);

    let fetched_at = Local::now();
    let started = Instant::now();

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status_code = response.status().as_u16();
    let final_url = response.url().clone();

    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Body {
                url: url.to_string(),
                source: e,
            }
        }
    })?;

    let elapsed = started.elapsed();

    tracing::debug!(
        "Fetched {} (status {}, {} bytes, {:.2}s)",
        final_url,
        status_code,
        body.len(),
        elapsed.as_secs_f64()
    );

    Ok(PageSnapshot {
        requested_url: url.clone(),
        final_url,
        status_code,
        body,
        elapsed,
        fetched_at,
    })
}

/// Maps a reqwest send error onto the fetch error taxonomy
fn classify_error(url: &Url, e: reqwest::Error) -> FetchError {
    let url = url.to_string();
    if e.is_timeout() {
        FetchError::Timeout { url }
    } else if e.is_redirect() {
        FetchError::RedirectLimit { url }
    } else if e.is_connect() {
        FetchError::Connect { url, source: e }
    } else {
        FetchError::Http { url, source: e }
    }
}
