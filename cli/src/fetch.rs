#![deny(missing_docs)]

//! # Spec Fetch
//!
//! Loads OpenAPI spec text from a URL or a filesystem path. Fetched once per
//! invocation; retry is a re-invocation.

use apiscout_core::{AppError, AppResult};

/// Reads the spec text behind `source`: an `http(s)://` URL is fetched over
/// the network, anything else is treated as a filesystem path.
pub fn fetch_spec_text(source: &str) -> AppResult<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_url(source)
    } else {
        Ok(std::fs::read_to_string(source)?)
    }
}

fn fetch_url(url: &str) -> AppResult<String> {
    let mut response = ureq::get(url)
        .call()
        .map_err(|e| AppError::SpecLoad(format!("Failed to fetch OpenAPI spec: {}", e)))?;
    response
        .body_mut()
        .read_to_string()
        .map_err(|e| AppError::SpecLoad(format!("Failed to read OpenAPI spec: {}", e)))
}
