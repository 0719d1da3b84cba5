//! Shared test feeds and helpers for integration tests.

use pubs_render::{parse_publications, Publication};

/// The two-entry feed used throughout the property tests.
///
/// `A` is dated 2020 with one author, `B` is dated 2021 with none.
pub const SMALL_FEED: &str = r#"[
    {"title": "A", "authors": ["Jane Doe"], "journal": "J", "year": 2020, "doi": "10.1/a"},
    {"title": "B", "year": 2021, "doi": "10.1/b"}
]"#;

/// A larger feed with shared years, an undated entry and mixed field shapes.
pub const LAB_FEED: &str = r#"[
    {"title": "Rowhammer Revisited", "authors": ["Jane Doe", "Max Mustermann"], "journal": "USENIX Security", "volume": 31, "pages": "1-18", "year": 2022, "doi": "10.5555/rh"},
    {"title": "Cache Side Channels on ARM", "authors": ["Erika Musterfrau"], "journal": "IEEE S&P", "year": 2021, "doi": "10.1109/sp.2021.1"},
    {"title": "Fault Injection at Scale", "authors": ["Jane Doe"], "journal": "CCS", "article": "42", "year": "2022", "doi": "10.1145/fi"},
    {"title": "Preprint on Spectre", "authors": "John Roe", "journal": "arXiv", "doi": "10.48550/arxiv.1"},
    {"title": "Timing Leaks in TLS", "authors": ["Alex Smith"], "journal": "NDSS", "volume": "7", "issue": "2", "year": 2019, "doi": "10.14722/ndss.2019.1"}
]"#;

pub fn feed(json: &str) -> Vec<Publication> {
    parse_publications(json).unwrap()
}

pub fn titles<'a>(items: impl Iterator<Item = &'a Publication>) -> Vec<String> {
    items.map(|p| p.title.clone().unwrap_or_default()).collect()
}
