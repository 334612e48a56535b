//! Page fetcher abstraction for retrieving HTML content.

use std::time::Duration;

use async_trait::async_trait;

use crate::Result;

/// Browser User-Agent sent with every request; the target sites tend to
/// block clients that do not look like a browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,\
    image/avif,image/webp,image/apng,*/*;q=0.8";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "es-PE,es;q=0.9,en;q=0.8";

/// Request settings applied when the HTTP client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Time allowed for the whole request, body included.
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(15),
        }
    }
}

impl FetcherConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Trait for fetching the full HTML content of a URL.
///
/// All configuration (headers, timeouts) is set at construction time;
/// `fetch` is a simple URL-in, HTML-out interface. Implementations must be
/// safe to call concurrently.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the HTML content of the given URL.
    ///
    /// Fails with [`SearchError::Upstream`](crate::SearchError::Upstream) on an
    /// HTTP status >= 400 or a network-level failure.
    async fn fetch(&self, url: &str) -> Result<String>;
}
