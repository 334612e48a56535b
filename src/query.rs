//! Search request validation and site-restricted query construction.

use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Message returned to clients that send no usable term.
pub const BLANK_TERM_MESSAGE: &str = "Debes proporcionar un término de búsqueda";

/// Inbound search request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The search term. `termino` is accepted for older clients.
    #[serde(default, alias = "termino")]
    pub term: String,
}

impl SearchRequest {
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }

    /// Returns the trimmed term, rejecting empty or whitespace-only input.
    pub fn validated_term(&self) -> Result<String> {
        let term = self.term.trim();
        if term.is_empty() {
            return Err(SearchError::InvalidQuery(BLANK_TERM_MESSAGE.into()));
        }
        Ok(term.to_string())
    }
}

/// Builds `"<term>" site:d1 OR site:d2 ...`.
///
/// The term is quoted verbatim; percent-encoding is left to URL assembly.
pub fn build_query<S: AsRef<str>>(term: &str, domains: &[S]) -> String {
    let filter = domains
        .iter()
        .map(|d| format!("site:{}", d.as_ref()))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("\"{}\" {}", term, filter)
}

/// Appends the percent-encoded query to a search endpoint.
pub fn search_url(endpoint: &str, query: &str) -> String {
    format!("{}?q={}", endpoint, urlencoding::encode(query))
}
