//! Properties of the view and export pipeline over realistic feeds.

mod common;

use std::collections::HashSet;

use common::{feed, titles, LAB_FEED, SMALL_FEED};
use pubs_render::view::{filter, sort};
use pubs_render::{
    compute_view, to_bibtex, to_citation, HtmlRenderer, Publication, PublicationsPage, SortOrder,
    YearKey,
};

#[test]
fn test_small_feed_descending_order() {
    let all = feed(SMALL_FEED);
    let view = compute_view(&all, "", SortOrder::Descending);
    assert_eq!(titles(view.publications()), vec!["B", "A"]);
}

#[test]
fn test_small_feed_query_doe() {
    let all = feed(SMALL_FEED);
    let view = compute_view(&all, "doe", SortOrder::Descending);
    assert_eq!(titles(view.publications()), vec!["A"]);
}

#[test]
fn test_small_feed_citation() {
    let all = feed(SMALL_FEED);
    assert_eq!(
        to_citation(&all[0]),
        "Jane Doe. A. J, 2020. https://doi.org/10.1/a"
    );
}

#[test]
fn test_filtered_view_is_subset_containing_query() {
    let all = feed(LAB_FEED);

    for query in ["doe", "CACHE", "10.1145", "s&p", "a", "zzz"] {
        // When: we filter with a non-empty query
        let result = filter(&all, query);

        // Then: every result is from the full set and contains the query
        assert!(result.len() <= all.len());
        let needle = query.to_lowercase();
        for p in &result {
            assert!(all.contains(p));
            assert!(
                p.search_text().contains(&needle),
                "'{}' does not contain '{}'",
                p.search_text(),
                needle
            );
        }
        // And: nothing matching was dropped
        let expected = all
            .iter()
            .filter(|p| p.search_text().contains(&needle))
            .count();
        assert_eq!(result.len(), expected);
    }
}

#[test]
fn test_sort_is_total_order_by_year() {
    let all = feed(LAB_FEED);
    let mut items: Vec<&Publication> = all.iter().collect();

    sort(&mut items, SortOrder::Descending);
    let years: Vec<Option<i64>> = items.iter().map(|p| p.year).collect();
    assert_eq!(
        years,
        vec![Some(2022), Some(2022), Some(2021), Some(2019), None]
    );

    sort(&mut items, SortOrder::Ascending);
    let years: Vec<Option<i64>> = items.iter().map(|p| p.year).collect();
    assert_eq!(
        years,
        vec![None, Some(2019), Some(2021), Some(2022), Some(2022)]
    );
}

#[test]
fn test_toggling_twice_restores_view() {
    let all = feed(LAB_FEED);
    let order = SortOrder::default();

    let before = compute_view(&all, "", order);
    let after = compute_view(&all, "", order.toggle().toggle());

    assert_eq!(before, after);
}

#[test]
fn test_grouping_partitions_view_exactly() {
    let all = feed(LAB_FEED);

    for order in [SortOrder::Descending, SortOrder::Ascending] {
        let view = compute_view(&all, "", order);

        // Every item appears exactly once
        assert_eq!(view.len(), all.len());
        let mut seen = HashSet::new();
        for p in view.publications() {
            assert!(seen.insert(p.doi.clone()), "duplicate {:?}", p.doi);
        }

        // Every item sits in the bucket for its own year
        for group in &view.groups {
            for p in &group.items {
                assert_eq!(YearKey::of(p), group.key);
            }
        }

        // Bucket keys are exactly the distinct years present, newest first, Unknown last
        let keys: Vec<YearKey> = view.groups.iter().map(|g| g.key).collect();
        assert_eq!(
            keys,
            vec![
                YearKey::Year(2022),
                YearKey::Year(2021),
                YearKey::Year(2019),
                YearKey::Unknown
            ]
        );
    }
}

#[test]
fn test_filtered_grouping_only_has_present_years() {
    let all = feed(LAB_FEED);
    let view = compute_view(&all, "jane doe", SortOrder::Descending);

    let keys: Vec<YearKey> = view.groups.iter().map(|g| g.key).collect();
    assert_eq!(keys, vec![YearKey::Year(2022)]);
    assert_eq!(view.groups[0].items.len(), 2);
    assert!(view.groups[0].open);
}

#[test]
fn test_bibtex_optional_fields_follow_source() {
    let all = feed(LAB_FEED);

    for p in &all {
        let bib = to_bibtex(p);
        assert!(bib.contains("\n  year = {"));
        assert!(bib.contains("\n  doi = {"));
        assert_eq!(bib.contains("\n  volume = {"), p.volume.is_some());
        assert_eq!(bib.contains("\n  number = {"), p.issue.is_some());
        assert_eq!(
            bib.contains("\n  pages = {"),
            p.pages.is_some() || p.article.is_some()
        );
    }
}

#[test]
fn test_fetch_failure_leaves_fallback_untouched() {
    // Given: a page whose container holds static fallback markup
    let fallback = "<ol><li>Static list of publications</li></ol>";
    let mut page = PublicationsPage::new(HtmlRenderer::new(fallback).unwrap());

    // When: the feed load fails
    let missing = pubs_render::load_publications(&pubs_render::FeedSource::parse(
        "/nonexistent/data/publications.json",
    ));
    page.init(missing).unwrap();
    page.on_search("anything").unwrap();
    page.on_sort_toggle().unwrap();

    // Then: the container is exactly the fallback
    assert_eq!(page.renderer().markup(), fallback);
}

#[test]
fn test_successful_load_replaces_fallback() {
    let fallback = "<ol><li>Static list of publications</li></ol>";
    let mut page = PublicationsPage::new(HtmlRenderer::new(fallback).unwrap());

    page.init(Ok(feed(LAB_FEED))).unwrap();

    let html = page.renderer().markup();
    assert!(!html.contains("Static list"));
    assert!(html.contains("<summary>Unknown</summary>"));
    assert_eq!(html.matches(r#"class="pub-card""#).count(), 5);
}
