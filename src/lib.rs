//! pubs-render: publication list rendering for a lab website.
//!
//! This library provides functionality to:
//! - Load the publications feed from a file or URL
//! - Filter, sort and group publications into a year-sectioned view
//! - Render that view as HTML cards
//! - Export publications as BibTeX entries and plain citations

pub mod cite;
pub mod clipboard;
pub mod config;
pub mod feed;
pub mod model;
pub mod page;
pub mod render;
pub mod view;

pub use cite::{bibtex_export, citation_export, citation_line, to_bibtex, to_citation};
pub use clipboard::{Clipboard, ClipboardError, SystemClipboard, CLIPBOARD_HANDOVER};
pub use config::SiteConfig;
pub use feed::{load_publications, parse_publications, FeedError, FeedSource};
pub use model::{Authors, Publication};
pub use page::{CopyButton, CopyFormat, PublicationsPage};
pub use render::{HtmlRenderer, RenderError, Renderer};
pub use view::{compute_view, GroupedView, SortOrder, YearGroup, YearKey};
