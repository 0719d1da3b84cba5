//! The publications section of a page: working set, controls and triggers.
//!
//! A feed that cannot be loaded leaves the container on its fallback markup,
//! and a clipboard that refuses a write leaves the copy control on its
//! original label. Only a renderer failure reaches the caller.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::cite::{to_bibtex, to_citation};
use crate::clipboard::Clipboard;
use crate::feed::FeedError;
use crate::model::Publication;
use crate::render::{RenderError, Renderer};
use crate::view::{compute_view, SortOrder};

/// How long a copy control shows its confirmation.
pub const COPY_FEEDBACK: Duration = Duration::from_millis(1200);

/// Label shown after a successful copy.
pub const COPIED_LABEL: &str = "Copied!";

/// Drives a [`Renderer`] from the search box and the sort toggle.
pub struct PublicationsPage<R: Renderer> {
    renderer: R,
    working_set: Option<Vec<Publication>>,
    query: String,
    order: SortOrder,
}

impl<R: Renderer> PublicationsPage<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            working_set: None,
            query: String::new(),
            order: SortOrder::default(),
        }
    }

    /// Takes the outcome of the single feed load.
    ///
    /// On success the list becomes the working set and the default view is
    /// rendered. A feed failure is logged and otherwise ignored; only a
    /// failing renderer is reported.
    pub fn init(&mut self, loaded: Result<Vec<Publication>, FeedError>) -> Result<(), RenderError> {
        match loaded {
            Ok(publications) => {
                self.working_set = Some(publications);
                self.query.clear();
                self.order = SortOrder::default();
                self.apply()
            }
            Err(e) => {
                debug!(error = %e, "publication feed unavailable, keeping fallback");
                Ok(())
            }
        }
    }

    /// Search box input. Ignored until the feed has loaded.
    pub fn on_search(&mut self, query: &str) -> Result<(), RenderError> {
        if self.working_set.is_none() {
            return Ok(());
        }
        self.query = query.to_string();
        self.apply()
    }

    /// Sort toggle click. Ignored until the feed has loaded.
    pub fn on_sort_toggle(&mut self) -> Result<(), RenderError> {
        if self.working_set.is_none() {
            return Ok(());
        }
        self.order = self.order.toggle();
        self.apply()
    }

    pub fn is_loaded(&self) -> bool {
        self.working_set.is_some()
    }

    pub fn working_set(&self) -> &[Publication] {
        self.working_set.as_deref().unwrap_or_default()
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn sort_label(&self) -> &'static str {
        self.order.indicator_label()
    }

    pub fn sort_pressed(&self) -> bool {
        self.order.is_pressed()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn apply(&mut self) -> Result<(), RenderError> {
        let Some(all) = &self.working_set else {
            return Ok(());
        };
        let view = compute_view(all, &self.query, self.order);
        self.renderer.render(&view)
    }
}

/// Export produced by a copy control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyFormat {
    Bibtex,
    Citation,
}

impl CopyFormat {
    /// Resting label of the control.
    pub fn label(self) -> &'static str {
        match self {
            CopyFormat::Bibtex => "Copy BibTeX",
            CopyFormat::Citation => "Copy citation",
        }
    }

    pub fn export(self, publication: &Publication) -> String {
        match self {
            CopyFormat::Bibtex => to_bibtex(publication),
            CopyFormat::Citation => to_citation(publication),
        }
    }
}

/// A copy control with its transient confirmation.
#[derive(Debug, Clone)]
pub struct CopyButton {
    format: CopyFormat,
    copied_at: Option<Instant>,
}

impl CopyButton {
    pub fn new(format: CopyFormat) -> Self {
        Self {
            format,
            copied_at: None,
        }
    }

    pub fn format(&self) -> CopyFormat {
        self.format
    }

    /// Copies the export of `publication`. Returns whether the write succeeded.
    pub fn activate(
        &mut self,
        publication: &Publication,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> bool {
        match clipboard.write_text(&self.format.export(publication)) {
            Ok(()) => {
                self.copied_at = Some(now);
                true
            }
            Err(e) => {
                debug!(error = %e, "copy failed");
                false
            }
        }
    }

    /// Label to show at `now`.
    pub fn label(&self, now: Instant) -> &'static str {
        match self.copied_at {
            Some(at) if now.saturating_duration_since(at) < COPY_FEEDBACK => COPIED_LABEL,
            _ => self.format.label(),
        }
    }
}
