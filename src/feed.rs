//! Publication feed loading.
//!
//! The feed is a JSON array of publication objects, read either from a file
//! or from an `http(s)://` URL. A load is a single attempt with no retry.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use reqwest::header::CACHE_CONTROL;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::Publication;

/// Where the site keeps its feed, relative to the site root.
pub const DEFAULT_FEED: &str = "data/publications.json";

/// Errors that can occur when loading the feed.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Server answered with status {0}")]
    Status(u16),

    #[error("Invalid feed: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Location of the publications document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Path(PathBuf),
    Url(String),
}

impl FeedSource {
    /// Interprets `http://` and `https://` prefixes as URLs, anything else as a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            FeedSource::Url(location.to_string())
        } else {
            FeedSource::Path(PathBuf::from(location))
        }
    }
}

impl Default for FeedSource {
    fn default() -> Self {
        FeedSource::Path(PathBuf::from(DEFAULT_FEED))
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Path(path) => write!(f, "{}", path.display()),
            FeedSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Loads the publications document from `source`.
///
/// # Errors
///
/// Returns an error if the document cannot be read, the server answers with
/// a non-success status, or the body is not a JSON array of publications.
pub fn load_publications(source: &FeedSource) -> Result<Vec<Publication>, FeedError> {
    let body = match source {
        FeedSource::Path(path) => read_file(path)?,
        FeedSource::Url(url) => fetch(url)?,
    };
    let publications = parse_publications(&body)?;
    info!(source = %source, count = publications.len(), "loaded publication feed");
    Ok(publications)
}

/// Parses a feed body. The top level must be an array.
pub fn parse_publications(body: &str) -> Result<Vec<Publication>, FeedError> {
    Ok(serde_json::from_str(body)?)
}

fn read_file(path: &Path) -> Result<String, FeedError> {
    debug!(path = %path.display(), "reading feed file");
    Ok(fs::read_to_string(path)?)
}

fn fetch(url: &str) -> Result<String, FeedError> {
    debug!(url, "fetching feed");
    let response = reqwest::blocking::Client::new()
        .get(url)
        .header(CACHE_CONTROL, "no-store")
        .send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status(status.as_u16()));
    }

    Ok(response.text()?)
}
