use crate::UrlError;
use std::path::{Path, PathBuf};
use url::Url;

/// Turns user input into the URL to analyze
///
/// # Steps
///
/// 1. Trim surrounding whitespace; reject empty input
/// 2. Prefix `https://` unless the input already starts with `http://` or `https://`
/// 3. Parse; reject URLs without a host
///
/// # Examples
///
/// ```
/// use seo_scope::url::normalize_target_url;
///
/// let url = normalize_target_url("example.com/about").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
///
/// let url = normalize_target_url("http://example.com").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/");
/// ```
pub fn normalize_target_url(input: &str) -> Result<Url, UrlError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlError::Empty);
    }

    let lowered = input.to_ascii_lowercase();
    let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&candidate).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Resolves the report path for a user-supplied filename
///
/// A `.txt` suffix is appended when missing. Relative names are placed under
/// `directory`; absolute paths are kept as given.
pub fn report_filename(input: &str, directory: &Path) -> Result<PathBuf, UrlError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(UrlError::Empty);
    }

    let name = if name.ends_with(".txt") {
        name.to_string()
    } else {
        format!("{}.txt", name)
    };

    let path = PathBuf::from(name);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(directory.join(path))
    }
}
