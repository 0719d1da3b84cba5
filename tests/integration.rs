//! Integration tests using TOML fixtures.
//!
//! This test harness loads test cases from TOML files in the `fixtures/` directory
//! and runs them against the pubs-render library.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use pubs_render::{compute_view, parse_publications, Publication, SortOrder};

/// A citation fixture: one publication and its expected text forms.
#[derive(Debug, Deserialize)]
struct CitationFixture {
    /// Name of the test case
    name: String,
    /// A single publication object (as a JSON string)
    publication: String,
    /// Expected card line
    #[serde(default)]
    expected_line: Option<String>,
    /// Expected plain citation
    #[serde(default)]
    expected_citation: Option<String>,
    /// Expected BibTeX entry
    #[serde(default)]
    expected_bibtex: Option<String>,
}

/// A view fixture: a feed, the controls, and the expected display order.
#[derive(Debug, Deserialize)]
struct ViewFixture {
    name: String,
    /// The feed (as a JSON string)
    feed: String,
    #[serde(default)]
    query: String,
    #[serde(default)]
    ascending: bool,
    /// Titles in display order
    expected: Vec<String>,
    /// Section headings in display order
    expected_groups: Vec<String>,
}

/// Load all fixtures from a directory.
fn load_fixtures<T: DeserializeOwned>(dir: &Path) -> Vec<(String, T)> {
    let mut fixtures = Vec::new();

    if !dir.exists() {
        return fixtures;
    }

    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();

        if path.extension().map_or(false, |e| e == "toml") {
            let content = fs::read_to_string(&path).unwrap();
            let fixture: T = toml::from_str(&content).unwrap();
            let name = path.file_stem().unwrap().to_string_lossy().to_string();
            fixtures.push((name, fixture));
        }
    }

    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    fixtures
}

/// Run citation tests - verify every text form of one publication.
fn run_citation_test(name: &str, fixture: &CitationFixture) {
    let publication: Publication = serde_json::from_str(&fixture.publication)
        .unwrap_or_else(|e| panic!("Test '{}' has an invalid publication: {}", name, e));

    if let Some(expected) = &fixture.expected_line {
        assert_eq!(
            pubs_render::citation_line(&publication),
            *expected,
            "Test '{}' card line mismatch",
            name
        );
    }

    if let Some(expected) = &fixture.expected_citation {
        assert_eq!(
            pubs_render::to_citation(&publication),
            *expected,
            "Test '{}' citation mismatch",
            name
        );
    }

    if let Some(expected) = &fixture.expected_bibtex {
        assert_eq!(
            pubs_render::to_bibtex(&publication),
            expected.trim(),
            "Test '{}' BibTeX mismatch",
            name
        );
    }
}

/// Run view tests - verify filtering, sorting and grouping.
fn run_view_test(name: &str, fixture: &ViewFixture) {
    let all = parse_publications(&fixture.feed)
        .unwrap_or_else(|e| panic!("Test '{}' has an invalid feed: {}", name, e));
    let order = if fixture.ascending {
        SortOrder::Ascending
    } else {
        SortOrder::Descending
    };

    let view = compute_view(&all, &fixture.query, order);

    let titles: Vec<String> = view
        .publications()
        .map(|p| p.title.clone().unwrap_or_default())
        .collect();
    assert_eq!(titles, fixture.expected, "Test '{}' order mismatch", name);

    let groups: Vec<String> = view.groups.iter().map(|g| g.key.to_string()).collect();
    assert_eq!(
        groups, fixture.expected_groups,
        "Test '{}' sections mismatch",
        name
    );
}

#[test]
fn test_citation_fixtures() {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/citations");
    let fixtures: Vec<(String, CitationFixture)> = load_fixtures(&fixtures_dir);
    assert!(!fixtures.is_empty(), "no citation fixtures found");

    for (name, fixture) in fixtures {
        println!("Running citation test: {}", fixture.name);
        run_citation_test(&name, &fixture);
    }
}

#[test]
fn test_view_fixtures() {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/views");
    let fixtures: Vec<(String, ViewFixture)> = load_fixtures(&fixtures_dir);
    assert!(!fixtures.is_empty(), "no view fixtures found");

    for (name, fixture) in fixtures {
        println!("Running view test: {}", fixture.name);
        run_view_test(&name, &fixture);
    }
}
