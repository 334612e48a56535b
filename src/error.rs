//! Error types for the meta search library.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The search term was empty or whitespace-only.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// An upstream page could not be fetched.
    ///
    /// `status` is set when the upstream answered with an HTTP error status,
    /// and is `None` for network-level failures (timeout, DNS, refused).
    #[error("Error querying {url}: {reason}")]
    Upstream {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    /// Failed to parse a selector or document.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl SearchError {
    /// Builds an upstream error for an HTTP error status.
    pub fn upstream_status(url: impl Into<String>, status: u16) -> Self {
        Self::Upstream {
            url: url.into(),
            status: Some(status),
            reason: format!("HTTP status {}", status),
        }
    }

    /// Builds an upstream error for a network-level failure.
    pub fn upstream_network(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Upstream {
            url: url.into(),
            status: None,
            reason: reason.to_string(),
        }
    }

    /// Returns the failing URL for upstream errors.
    pub fn upstream_url(&self) -> Option<&str> {
        match self {
            Self::Upstream { url, .. } => Some(url),
            _ => None,
        }
    }
}
