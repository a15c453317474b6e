//! URL handling module for seo-scope
//!
//! This module turns interactive input into target URLs and report paths,
//! and derives hosts and origins for link classification and site probes.

mod domain;
mod target;

// Re-export main functions
pub use domain::{extract_domain, origin_resource, same_host};
pub use target::{normalize_target_url, report_filename};
