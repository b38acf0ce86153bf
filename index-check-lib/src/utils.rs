//! Input helpers: URL list parsing and pre-flight validation.

use crate::error::IndexCheckError;
use std::fs;
use std::path::Path;

/// Split free text into an ordered URL list.
///
/// One URL per line. Lines are trimmed; blank lines and lines starting with
/// `#` are skipped. Order and duplicates are preserved.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read a URL list from a file (see [`parse_url_list`] for the format).
pub fn read_urls_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, IndexCheckError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(IndexCheckError::file_error(
            path.to_string_lossy(),
            "File not found",
        ));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        IndexCheckError::file_error(
            path.to_string_lossy(),
            format!("Failed to read URL list: {}", e),
        )
    })?;

    Ok(parse_url_list(&content))
}

/// Reject a batch before any request is made.
///
/// The API key must be non-blank and the URL list must contain at least one
/// non-blank entry.
pub fn validate_batch_input(urls: &[String], api_key: &str) -> Result<(), IndexCheckError> {
    if api_key.trim().is_empty() {
        return Err(IndexCheckError::validation(
            "Please provide a search API key (--api-key or IC_API_KEY)",
        ));
    }

    if urls.is_empty() {
        return Err(IndexCheckError::validation("Please provide at least one URL"));
    }

    if let Some(position) = urls.iter().position(|url| url.trim().is_empty()) {
        return Err(IndexCheckError::validation(format!(
            "URL at position {} is empty",
            position + 1
        )));
    }

    Ok(())
}
