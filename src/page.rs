//! HTML page rendering.
//!
//! Injects chart markup into the page shell with handlebars.

use crate::constants::PLOTLY_JS_CDN;
use crate::error::Result;
use chrono::{DateTime, Utc};
use handlebars::Handlebars;
use serde::Serialize;

const INDEX_TEMPLATE_NAME: &str = "index";
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Values substituted into the page shell
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub title: String,
    /// Pre-rendered chart markup, inserted unescaped
    pub plot: String,
    pub source: String,
    pub fetched_at: String,
    pub top_n: usize,
    pub plotly_src: &'static str,
}

impl PageContext {
    pub fn new(
        title: impl Into<String>,
        plot: String,
        source: impl Into<String>,
        fetched_at: DateTime<Utc>,
        top_n: usize,
    ) -> Self {
        Self {
            title: title.into(),
            plot,
            source: source.into(),
            fetched_at: fetched_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            top_n,
            plotly_src: PLOTLY_JS_CDN,
        }
    }
}

/// Template registry shared across requests
pub struct PageRenderer {
    registry: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_template_string(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;
        Ok(Self { registry })
    }

    pub fn render_index(&self, context: &PageContext) -> Result<String> {
        Ok(self.registry.render(INDEX_TEMPLATE_NAME, context)?)
    }
}
