//! HTTP-based page fetcher using reqwest.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use tracing::{debug, warn};

use crate::fetcher::{FetcherConfig, PageFetcher};
use crate::{Result, SearchError};

/// A page fetcher that uses plain HTTP requests via reqwest.
///
/// The underlying client pools connections and is safe to share across
/// concurrent fetches. No cookie store is enabled.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a new `HttpFetcher` with browser-like default headers.
    pub fn new() -> Result<Self> {
        Self::with_config(&FetcherConfig::default())
    }

    /// Creates an `HttpFetcher` from explicit settings.
    pub fn with_config(config: &FetcherConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, header_value(&config.accept)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&config.accept_language)?);

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Creates an `HttpFetcher` with a custom reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| SearchError::Config(format!("Invalid header value {:?}: {}", value, e)))
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                warn!("Request to {} failed: {}", url, e);
                SearchError::upstream_network(url, e)
            })?;

        let status = response.status();
        if status.as_u16() >= 400 {
            warn!("{} answered with status {}", url, status);
            return Err(SearchError::upstream_status(url, status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::upstream_network(url, e))?;
        debug!("Fetched {} bytes from {}", html.len(), url);
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn header_is(name: &'static str, expected: &'static str) -> impl Fn(&Request) -> bool {
        move |req: &Request| {
            req.headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map_or(false, |v| v == expected)
        }
    }

    #[test]
    fn test_http_fetcher_new() {
        let _fetcher = HttpFetcher::new().unwrap();
    }

    #[test]
    fn test_http_fetcher_with_client() {
        let client = Client::builder().user_agent("test-agent").build().unwrap();
        let _fetcher = HttpFetcher::with_client(client);
    }

    #[test]
    fn test_http_fetcher_rejects_invalid_header() {
        let config = FetcherConfig {
            accept: "text/html\nInjected: yes".to_string(),
            ..Default::default()
        };
        let result = HttpFetcher::with_config(&config);
        assert!(matches!(result, Err(SearchError::Config(_))));
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/scholar"))
            .and(header_is("user-agent", crate::fetcher::DEFAULT_USER_AGENT))
            .and(header_is("accept-language", "es-PE,es;q=0.9,en;q=0.8"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let html = fetcher
            .fetch(&format!("{}/scholar", server.uri()))
            .await
            .unwrap();
        assert_eq!(html, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_fetch_error_status_is_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let url = format!("{}/search?q=x", server.uri());
        let err = HttpFetcher::new().unwrap().fetch(&url).await.unwrap_err();
        match err {
            SearchError::Upstream { url: failed, status, .. } => {
                assert_eq!(failed, url);
                assert_eq!(status, Some(503));
            }
            other => panic!("Expected Upstream, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_client_error_status_is_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let err = HttpFetcher::new()
            .unwrap()
            .fetch(&server.uri())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Upstream { status: Some(429), .. }));
    }

    #[tokio::test]
    async fn test_fetch_redirect_status_below_400_is_followed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/moved"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("location", "/target"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/target"))
            .respond_with(ResponseTemplate::new(200).set_body_string("landed"))
            .mount(&server)
            .await;

        let html = HttpFetcher::new()
            .unwrap()
            .fetch(&format!("{}/moved", server.uri()))
            .await
            .unwrap();
        assert_eq!(html, "landed");
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let config = FetcherConfig::default().with_timeout(Duration::from_millis(200));
        let err = HttpFetcher::with_config(&config)
            .unwrap()
            .fetch(&server.uri())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Upstream { status: None, .. }));
    }

    #[test]
    fn test_fetch_connection_refused_is_upstream() {
        // Port 9 (discard) is essentially never listening on loopback.
        let fetcher = HttpFetcher::new().unwrap();
        let result = tokio_test::block_on(fetcher.fetch("http://127.0.0.1:9/"));
        assert!(matches!(result, Err(SearchError::Upstream { status: None, .. })));
    }
}
