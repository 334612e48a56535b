//! Extractor trait and page markup descriptions.

use crate::query;
use crate::source::{ExtractorKind, SourceSpec};
use crate::SearchResult;

/// Selectors describing a Google Scholar result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScholarMarkup {
    /// One element per result.
    pub container: String,
    /// Anchor carrying both the title text and the link.
    pub title_link: String,
    pub snippet: String,
}

impl Default for ScholarMarkup {
    fn default() -> Self {
        Self {
            container: ".gs_r.gs_or.gs_scl".to_string(),
            title_link: ".gs_rt a".to_string(),
            snippet: ".gs_rs".to_string(),
        }
    }
}

/// Selectors describing a Google Web Search result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebMarkup {
    pub container: String,
    pub heading: String,
    /// The first match is taken as the result link.
    pub link: String,
    /// May be a selector group; the first match in document order wins.
    pub snippet: String,
}

impl Default for WebMarkup {
    fn default() -> Self {
        Self {
            container: "div.g".to_string(),
            heading: "h3".to_string(),
            link: "a".to_string(),
            snippet: ".VwiC3b, .st".to_string(),
        }
    }
}

/// Converts one fetched result page into a bounded list of results.
///
/// Parsing is synchronous and tolerant: a missing optional element degrades
/// one field, a missing required element drops one item, and nothing in the
/// page content can make extraction fail.
pub trait Extractor: Send + Sync {
    /// Which page variant this extractor understands.
    fn kind(&self) -> ExtractorKind;

    /// Search endpoint, without query string.
    fn endpoint(&self) -> &str;

    /// Extracts at most the configured number of results whose link matches
    /// one of `spec.domains`, tagged with `spec.name`.
    fn extract(&self, html: &str, spec: &SourceSpec) -> Vec<SearchResult>;

    /// Full request URL for an already-built query.
    fn search_url(&self, query: &str) -> String {
        query::search_url(self.endpoint(), query)
    }
}
