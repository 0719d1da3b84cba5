//! Text forms of a publication: the card line, BibTeX and a plain citation.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::Publication;
use crate::view::GroupedView;

/// Human-readable line shown on a publication card.
///
/// Parts are title, authors, the journal fragment, the pages fragment and the
/// year, each kept only when non-empty. The last part is always appended as
/// its own `, `-separated clause, even when nothing precedes it.
pub fn citation_line(p: &Publication) -> String {
    let journal = join_present(&[
        p.journal.clone(),
        p.volume.as_ref().map(|v| format!("vol. {}", v)),
        p.issue.as_ref().map(|i| format!("no. {}", i)),
    ]);
    let pages = join_present(&[
        p.pages.clone(),
        p.article.as_ref().map(|a| format!("article {}", a)),
    ]);

    let parts: Vec<String> = [
        p.title.clone(),
        p.authors.as_ref().map(|a| a.joined(", ")),
        Some(journal),
        Some(pages),
        p.year.map(|y| y.to_string()),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect();

    match parts.split_last() {
        Some((last, head)) => format!("{}, {}", head.join(", "), last),
        None => ", ".to_string(),
    }
}

/// Citation key: first token of the first author, lowercased, then the year.
pub fn bibtex_key(p: &Publication) -> String {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let separators = SEPARATORS.get_or_init(|| Regex::new(r"[ ,.\-]").expect("valid pattern"));

    let first = p
        .authors
        .as_ref()
        .and_then(|a| a.first())
        .filter(|name| !name.is_empty())
        .unwrap_or("key");
    let token = separators.split(first).next().unwrap_or_default();

    let year = p.year.map(|y| y.to_string()).unwrap_or_default();
    format!("{}{}", token.to_lowercase(), year)
}

/// BibTeX `@article` entry.
///
/// `year` and `doi` are always emitted. When both `pages` and `article` are
/// set, both land in a `pages` field.
pub fn to_bibtex(p: &Publication) -> String {
    let mut fields: Vec<(&str, String)> = Vec::new();

    if let Some(authors) = &p.authors {
        fields.push(("author", authors.joined(" and ")));
    }
    let optional = [
        ("title", &p.title),
        ("journal", &p.journal),
        ("volume", &p.volume),
        ("number", &p.issue),
        ("pages", &p.pages),
        ("pages", &p.article),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            fields.push((name, value.clone()));
        }
    }
    fields.push(("year", p.year.map(|y| y.to_string()).unwrap_or_default()));
    fields.push(("doi", p.doi.clone().unwrap_or_default()));

    let body: Vec<String> = fields
        .iter()
        .map(|(name, value)| format!("  {} = {{{}}}", name, value))
        .collect();

    format!("@article{{{},\n{}\n}}", bibtex_key(p), body.join(",\n"))
}

/// Plain citation sentence ending with the DOI link.
pub fn to_citation(p: &Publication) -> String {
    let vol_iss = join_present(&[
        p.volume.as_ref().map(|v| format!("vol. {}", v)),
        p.issue.as_ref().map(|i| format!("no. {}", i)),
    ]);
    let pages = p
        .pages
        .clone()
        .or_else(|| p.article.as_ref().map(|a| format!("article {}", a)))
        .unwrap_or_default();

    let mut out = format!(
        "{}. {}. {}",
        p.authors_joined(", "),
        p.title.as_deref().unwrap_or_default(),
        p.journal.as_deref().unwrap_or_default(),
    );
    if !vol_iss.is_empty() {
        out.push_str(", ");
        out.push_str(&vol_iss);
    }
    if !pages.is_empty() {
        out.push_str(", ");
        out.push_str(&pages);
    }
    out.push_str(&format!(
        ", {}. {}",
        p.year.map(|y| y.to_string()).unwrap_or_default(),
        p.doi_url()
    ));
    out
}

/// BibTeX entries for a whole view, separated by blank lines.
pub fn bibtex_export(view: &GroupedView<'_>) -> String {
    view.publications()
        .map(to_bibtex)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One plain citation per line for a whole view.
pub fn citation_export(view: &GroupedView<'_>) -> String {
    view.publications()
        .map(to_citation)
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_present(pieces: &[Option<String>]) -> String {
    pieces
        .iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}
