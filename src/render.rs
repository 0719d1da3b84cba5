//! Display of a grouped view.
//!
//! The view logic never touches markup directly: it hands a [`GroupedView`]
//! to a [`Renderer`], which owns whatever display tree it draws into.

use minijinja::{context, Environment};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::cite::{citation_line, to_bibtex, to_citation};
use crate::page::CopyFormat;
use crate::view::GroupedView;

/// Errors that can occur while rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Something that can display a grouped view.
pub trait Renderer {
    /// Replaces whatever is currently displayed with `view`.
    fn render(&mut self, view: &GroupedView<'_>) -> Result<(), RenderError>;
}

const TEMPLATE_NAME: &str = "publications.html";

const TEMPLATE: &str = r#"{% for group in groups -%}
<details{% if group.open %} open{% endif %}>
  <summary>{{ group.label }}</summary>
  <ul class="pubs">
{%- for card in group.cards %}
    <li>
      <div>
        <a class="pub-card" href="{{ card.href }}" target="_blank" rel="noopener noreferrer" aria-label="Open DOI for {{ card.title }}"><span class="chip journal">{{ card.journal }}</span>{{ card.text }}</a>
        <div class="pub-actions">
{%- for action in card.actions %}
          <button type="button" class="pill" data-copy="{{ action.text }}">{{ action.label }}</button>
{%- endfor %}
        </div>
      </div>
    </li>
{%- endfor %}
  </ul>
</details>
{% endfor %}"#;

#[derive(Serialize)]
struct GroupContext {
    label: String,
    open: bool,
    cards: Vec<CardContext>,
}

#[derive(Serialize)]
struct CardContext {
    href: String,
    title: String,
    journal: String,
    text: String,
    actions: Vec<ActionContext>,
}

#[derive(Serialize)]
struct ActionContext {
    label: &'static str,
    text: String,
}

fn build_groups(view: &GroupedView<'_>) -> Vec<GroupContext> {
    view.groups
        .iter()
        .map(|group| GroupContext {
            label: group.key.to_string(),
            open: group.open,
            cards: group
                .items
                .iter()
                .map(|p| CardContext {
                    href: p.doi_url(),
                    title: p.title.clone().unwrap_or_default(),
                    journal: p.journal.clone().unwrap_or_default(),
                    text: citation_line(p),
                    actions: vec![
                        ActionContext {
                            label: CopyFormat::Bibtex.label(),
                            text: to_bibtex(p),
                        },
                        ActionContext {
                            label: CopyFormat::Citation.label(),
                            text: to_citation(p),
                        },
                    ],
                })
                .collect(),
        })
        .collect()
}

/// Renders views as HTML into a single list container.
///
/// The container starts out holding the page's fallback markup and keeps it
/// until the first successful render.
pub struct HtmlRenderer {
    env: Environment<'static>,
    markup: String,
}

impl HtmlRenderer {
    /// Creates a renderer whose container holds `fallback`.
    pub fn new(fallback: impl Into<String>) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self {
            env,
            markup: fallback.into(),
        })
    }

    /// Current content of the list container.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn into_markup(self) -> String {
        self.markup
    }
}

impl Renderer for HtmlRenderer {
    fn render(&mut self, view: &GroupedView<'_>) -> Result<(), RenderError> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        let markup = template.render(context! { groups => build_groups(view) })?;
        debug!(groups = view.groups.len(), items = view.len(), "rendered publication list");
        self.markup = markup;
        Ok(())
    }
}
