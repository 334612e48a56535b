//! Search result types.

use serde::{Deserialize, Serialize};

/// A single extracted result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title.
    pub title: String,
    /// Result URL, as found on the page.
    pub link: String,
    /// Result description/snippet.
    pub snippet: String,
    /// Name of the source that produced this result.
    pub source: String,
}

impl SearchResult {
    /// Creates a new search result.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
            source: source.into(),
        }
    }
}

/// A source whose leg failed under best-effort aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    pub source: String,
    /// URL that failed, when the failure happened while fetching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub reason: String,
}

/// Combined response for one search term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The trimmed search term.
    pub term: String,
    /// Results in source priority order.
    pub results: Vec<SearchResult>,
    /// Sources that failed; only populated under best-effort aggregation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_sources: Vec<SourceFailure>,
}

impl SearchResponse {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Default::default()
        }
    }

    /// Returns `true` if at least one source failed.
    pub fn is_partial(&self) -> bool {
        !self.failed_sources.is_empty()
    }
}
