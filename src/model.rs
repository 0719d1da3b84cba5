//! Publication records as they appear in the feed.
//!
//! The feed is hand-maintained JSON, so numeric-looking fields are accepted
//! either as JSON numbers or as text. Empty text and zero count as absent,
//! matching how the site has always displayed them.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Base of every DOI link.
pub const DOI_RESOLVER: &str = "https://doi.org/";

/// The author list of a publication.
///
/// Most entries carry an ordered list of names, but older entries store a
/// single pre-joined string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Authors {
    List(Vec<String>),
    Single(String),
}

impl Authors {
    /// Names joined with `sep`. A single string is returned unchanged.
    pub fn joined(&self, sep: &str) -> String {
        match self {
            Authors::List(names) => names.join(sep),
            Authors::Single(name) => name.clone(),
        }
    }

    /// The first listed name, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            Authors::List(names) => names.first().map(String::as_str),
            Authors::Single(name) => Some(name.as_str()),
        }
    }
}

/// A single entry of the publications feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Publication {
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Option<Authors>,
    #[serde(default, deserialize_with = "text")]
    pub journal: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub volume: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub issue: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub pages: Option<String>,
    /// Article number, used by journals without page ranges.
    #[serde(default, deserialize_with = "text")]
    pub article: Option<String>,
    #[serde(default, deserialize_with = "year")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "text")]
    pub doi: Option<String>,
}

impl Publication {
    /// Link target for the publication card.
    pub fn doi_url(&self) -> String {
        format!("{}{}", DOI_RESOLVER, self.doi.as_deref().unwrap_or_default())
    }

    /// Authors joined with `sep`, or an empty string when there are none.
    pub fn authors_joined(&self, sep: &str) -> String {
        self.authors
            .as_ref()
            .map(|a| a.joined(sep))
            .unwrap_or_default()
    }

    /// Lowercased haystack searched by the free-text filter.
    pub fn search_text(&self) -> String {
        let authors = self.authors_joined(", ");
        [
            self.title.as_deref().unwrap_or_default(),
            authors.as_str(),
            self.journal.as_deref().unwrap_or_default(),
            self.doi.as_deref().unwrap_or_default(),
        ]
        .map(str::to_lowercase)
        .join(" ")
    }
}

/// Text-or-number field; empty text, zero, `null` and other shapes are absent.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    })
}

/// Integer year, also accepted as numeric text. Anything else is unknown.
fn year<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|y| *y != 0))
}
