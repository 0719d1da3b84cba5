//! Site configuration file.
//!
//! ```toml
//! feed = "https://lab.example/data/publications.json"
//! fallback = "partials/publications-fallback.html"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::feed::DEFAULT_FEED;

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    TomlError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Feed location, a path or an `http(s)://` URL.
    pub feed: String,
    /// Markup shown when the feed is unavailable.
    pub fallback: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            feed: DEFAULT_FEED.to_string(),
            fallback: None,
        }
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
