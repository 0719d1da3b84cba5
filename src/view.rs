//! Filtered, sorted and year-grouped projection of the working set.
//!
//! Every function here borrows the working set and returns a fresh view, so
//! recomputing after each search keystroke or sort toggle never drifts from
//! the full list.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::model::Publication;

/// Item order by year. The site starts with newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    Descending,
    Ascending,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Descending => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
        }
    }

    /// Text shown on the sort toggle.
    pub fn indicator_label(self) -> &'static str {
        match self {
            SortOrder::Descending => "Sort by year ↓",
            SortOrder::Ascending => "Sort by year ↑",
        }
    }

    /// Pressed state of the sort toggle (`aria-pressed`).
    pub fn is_pressed(self) -> bool {
        self == SortOrder::Descending
    }
}

/// Heading of a year section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearKey {
    Year(i64),
    Unknown,
}

impl YearKey {
    pub fn of(publication: &Publication) -> Self {
        publication.year.map_or(YearKey::Unknown, YearKey::Year)
    }
}

impl Ord for YearKey {
    /// Newest year first, `Unknown` after every year.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (YearKey::Year(a), YearKey::Year(b)) => b.cmp(a),
            (YearKey::Year(_), YearKey::Unknown) => Ordering::Less,
            (YearKey::Unknown, YearKey::Year(_)) => Ordering::Greater,
            (YearKey::Unknown, YearKey::Unknown) => Ordering::Equal,
        }
    }
}

impl PartialOrd for YearKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for YearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearKey::Year(year) => write!(f, "{}", year),
            YearKey::Unknown => f.write_str("Unknown"),
        }
    }
}

/// One collapsible year section.
#[derive(Debug, Clone, PartialEq)]
pub struct YearGroup<'a> {
    pub key: YearKey,
    /// Only the most recent section starts expanded.
    pub open: bool,
    pub items: Vec<&'a Publication>,
}

/// The view currently on display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedView<'a> {
    pub groups: Vec<YearGroup<'a>>,
}

impl<'a> GroupedView<'a> {
    /// Number of publications across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Publications in display order.
    pub fn publications(&self) -> impl Iterator<Item = &'a Publication> + '_ {
        self.groups.iter().flat_map(|g| g.items.iter().copied())
    }
}

/// Keeps publications whose search text contains `query`, case-insensitively.
///
/// An empty query passes every publication through.
pub fn filter<'a>(all: &'a [Publication], query: &str) -> Vec<&'a Publication> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return all.iter().collect();
    }
    all.iter()
        .filter(|p| p.search_text().contains(&needle))
        .collect()
}

/// Stable sort by year.
///
/// Undated publications come after every dated one when descending and
/// before them when ascending.
pub fn sort(items: &mut [&Publication], order: SortOrder) {
    items.sort_by(|a, b| match order {
        SortOrder::Ascending => compare_years(a.year, b.year),
        SortOrder::Descending => compare_years(b.year, a.year),
    });
}

fn compare_years(a: Option<i64>, b: Option<i64>) -> Ordering {
    // None < Some, so ascending puts undated items first
    a.cmp(&b)
}

/// Partitions `items` into year sections, newest year first.
pub fn group<'a>(items: &[&'a Publication]) -> Vec<YearGroup<'a>> {
    let mut buckets: BTreeMap<YearKey, Vec<&'a Publication>> = BTreeMap::new();
    for p in items {
        buckets.entry(YearKey::of(p)).or_default().push(p);
    }

    buckets
        .into_iter()
        .enumerate()
        .map(|(idx, (key, items))| YearGroup {
            key,
            open: idx == 0,
            items,
        })
        .collect()
}

/// Filters, sorts and groups the working set.
pub fn compute_view<'a>(all: &'a [Publication], query: &str, order: SortOrder) -> GroupedView<'a> {
    let mut items = filter(all, query);
    sort(&mut items, order);
    GroupedView {
        groups: group(&items),
    }
}
