//! HTTP fetching for the analyzed page
//!
//! This module owns the single primary request of an analysis run:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Fetching the page once and capturing it as a [`PageSnapshot`]
//! - Classifying transport failures into [`FetchError`](crate::FetchError)

mod client;
mod snapshot;

pub use client::build_http_client;
pub use snapshot::{fetch_page, PageSnapshot};
