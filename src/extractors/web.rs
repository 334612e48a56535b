//! Google Web Search result page extractor.

use scraper::Selector;
use tracing::debug;

use crate::document::{self, Document, Field};
use crate::extractor::{Extractor, WebMarkup};
use crate::source::{ExtractorKind, SourceSpec, MAX_RESULTS_PER_SOURCE};
use crate::{Result, SearchResult};

pub const DEFAULT_WEB_BASE: &str = "https://www.google.com";

/// Snippet used when a result carries no summary element.
pub const MISSING_SNIPPET: &str = "Resumen no disponible.";

/// Extractor for Google Web Search pages (PJ/TC).
#[derive(Debug)]
pub struct Web {
    endpoint: String,
    container: Selector,
    heading: Selector,
    link: Selector,
    snippet: Selector,
}

impl Web {
    /// Creates a Web extractor against the public endpoint.
    pub fn new() -> Result<Self> {
        Self::with_markup(DEFAULT_WEB_BASE, &WebMarkup::default())
    }

    /// Creates a Web extractor with a custom base URL and markup.
    pub fn with_markup(base_url: &str, markup: &WebMarkup) -> Result<Self> {
        Ok(Self {
            endpoint: format!("{}/search", base_url.trim_end_matches('/')),
            container: document::compile(&markup.container)?,
            heading: document::compile(&markup.heading)?,
            link: document::compile(&markup.link)?,
            snippet: document::compile(&markup.snippet)?,
        })
    }
}

impl Extractor for Web {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Web
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn extract(&self, html: &str, spec: &SourceSpec) -> Vec<SearchResult> {
        let document = Document::parse(html);
        let mut results = Vec::new();

        for item in document.select_all(&self.container) {
            if results.len() >= MAX_RESULTS_PER_SOURCE {
                break;
            }

            let (Some(heading), Some(anchor)) =
                (item.select_one(&self.heading), item.select_one(&self.link))
            else {
                continue;
            };
            let link = match anchor.attr("href") {
                Field::Text(link) => link,
                _ => continue,
            };
            if !spec.allows(&link) {
                debug!("{}: skipping off-domain link {}", spec.name, link);
                continue;
            }

            let title = heading.text().or_absent("");
            let snippet = item.child_text(&self.snippet).or_absent(MISSING_SNIPPET);

            results.push(SearchResult::new(title, link, snippet, spec.name.clone()));
        }

        results
    }
}
