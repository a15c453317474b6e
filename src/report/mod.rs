//! Plain-text report generation
//!
//! Renders every signal of an analyzed page into one UTF-8 document, one
//! delimited section per signal, ending with the prioritized suggestions.

mod text;

pub use text::{format_report, format_suggestions, write_report, RULE_WIDTH, SECTION_TITLES};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing a report
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write report to {}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
