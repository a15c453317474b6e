//! Configuration module for seo-scope
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so running without a file is
//! the same as loading an empty one.
//!
//! # Example
//!
//! ```no_run
//! use seo_scope::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seo-scope.toml")).unwrap();
//! println!("Page timeout: {}s", config.http.page_timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, OutputConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{load_config, load_optional_config, parse_config};
pub use validation::validate;
