//! Google Scholar result page extractor.

use scraper::Selector;
use tracing::debug;

use crate::document::{self, Document, Field};
use crate::extractor::{Extractor, ScholarMarkup};
use crate::source::{ExtractorKind, SourceSpec, MAX_RESULTS_PER_SOURCE};
use crate::{Result, SearchResult};

pub const DEFAULT_SCHOLAR_BASE: &str = "https://scholar.google.com";

/// Extractor for Google Scholar pages (PUCP, UNMSM).
#[derive(Debug)]
pub struct Scholar {
    endpoint: String,
    container: Selector,
    title_link: Selector,
    snippet: Selector,
}

impl Scholar {
    /// Creates a Scholar extractor against the public endpoint.
    pub fn new() -> Result<Self> {
        Self::with_markup(DEFAULT_SCHOLAR_BASE, &ScholarMarkup::default())
    }

    /// Creates a Scholar extractor with a custom base URL and markup.
    pub fn with_markup(base_url: &str, markup: &ScholarMarkup) -> Result<Self> {
        Ok(Self {
            endpoint: format!("{}/scholar", base_url.trim_end_matches('/')),
            container: document::compile(&markup.container)?,
            title_link: document::compile(&markup.title_link)?,
            snippet: document::compile(&markup.snippet)?,
        })
    }
}

impl Extractor for Scholar {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Scholar
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

            let Some(anchor) = item.select_one(&self.title_link) else {
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

            let title = anchor.text().or_absent("");
            let snippet = item.child_text(&self.snippet).or_absent("");

            results.push(SearchResult::new(title, link, snippet, spec.name.clone()));
        }

        results
    }
}
