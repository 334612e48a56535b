//! Service configuration: endpoints, fetch limits and aggregation policy.

use std::sync::Arc;

use url::Url;

use crate::aggregator::AggregationPolicy;
use crate::extractor::{Extractor, ScholarMarkup, WebMarkup};
use crate::extractors::{Scholar, Web, DEFAULT_SCHOLAR_BASE, DEFAULT_WEB_BASE};
use crate::fetcher::{FetcherConfig, PageFetcher};
use crate::fetcher_http::HttpFetcher;
use crate::source::{ExtractorKind, Source};
use crate::{MetaSearch, Result, SearchError};

/// Everything needed to assemble a [`MetaSearch`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL for Google Scholar requests.
    pub scholar_base: String,
    /// Base URL for Google Web Search requests.
    pub web_base: String,
    pub scholar_markup: ScholarMarkup,
    pub web_markup: WebMarkup,
    pub fetcher: FetcherConfig,
    pub policy: AggregationPolicy,
    /// Sources to query; kept in registry order regardless of input order.
    pub sources: Vec<Source>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            scholar_base: DEFAULT_SCHOLAR_BASE.to_string(),
            web_base: DEFAULT_WEB_BASE.to_string(),
            scholar_markup: ScholarMarkup::default(),
            web_markup: WebMarkup::default(),
            fetcher: FetcherConfig::default(),
            policy: AggregationPolicy::FailFast,
            sources: Source::ALL.to_vec(),
        }
    }
}

impl ServiceConfig {
    /// Points both Scholar and Web requests at the same base URL.
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.scholar_base = base.clone();
        self.web_base = base;
        self
    }

    pub fn with_policy(mut self, policy: AggregationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_fetcher(mut self, fetcher: FetcherConfig) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Restricts the sources to query.
    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }

    /// Checks base URLs and the source list.
    pub fn validate(&self) -> Result<()> {
        validate_base(&self.scholar_base)?;
        validate_base(&self.web_base)?;
        if self.sources.is_empty() {
            return Err(SearchError::Config("at least one source is required".into()));
        }
        Ok(())
    }

    /// Builds a meta search using a reqwest-backed fetcher.
    pub fn build(&self) -> Result<MetaSearch> {
        let fetcher = HttpFetcher::with_config(&self.fetcher)?;
        self.build_with_fetcher(Arc::new(fetcher))
    }

    /// Builds a meta search around an existing fetcher.
    pub fn build_with_fetcher(&self, fetcher: Arc<dyn PageFetcher>) -> Result<MetaSearch> {
        self.validate()?;

        let scholar: Arc<dyn Extractor> =
            Arc::new(Scholar::with_markup(&self.scholar_base, &self.scholar_markup)?);
        let web: Arc<dyn Extractor> = Arc::new(Web::with_markup(&self.web_base, &self.web_markup)?);

        let mut search = MetaSearch::new(fetcher);
        search.set_policy(self.policy);

        let mut sources = self.sources.clone();
        sources.sort();
        sources.dedup();
        for source in sources {
            let extractor = match source.extractor_kind() {
                ExtractorKind::Scholar => Arc::clone(&scholar),
                ExtractorKind::Web => Arc::clone(&web),
            };
            search.add_source(source.spec(), extractor)?;
        }

        Ok(search)
    }
}

/// Parses a comma-separated source list such as `pucp,unmsm`.
pub fn parse_sources<S: AsRef<str>>(names: &[S]) -> Result<Vec<Source>> {
    names
        .iter()
        .map(|name| {
            Source::from_name(name.as_ref()).ok_or_else(|| {
                SearchError::Config(format!(
                    "unknown source '{}' (expected pucp, unmsm or pjtc)",
                    name.as_ref()
                ))
            })
        })
        .collect()
}

fn validate_base(base: &str) -> Result<()> {
    let url = Url::parse(base)?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(SearchError::Config(format!(
            "base URL '{}' must use http or https, not {}",
            base, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_service_config_default() {
        let config = ServiceConfig::default();
        assert_eq!(config.scholar_base, "https://scholar.google.com");
        assert_eq!(config.web_base, "https://www.google.com");
        assert_eq!(config.policy, AggregationPolicy::FailFast);
        assert_eq!(config.sources, Source::ALL.to_vec());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_base_url() {
        let config = ServiceConfig::default().with_base_url("http://127.0.0.1:9000");
        assert_eq!(config.scholar_base, "http://127.0.0.1:9000");
        assert_eq!(config.web_base, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_validate_rejects_bad_base() {
        let config = ServiceConfig::default().with_base_url("not a url");
        assert!(matches!(config.validate(), Err(SearchError::UrlParse(_))));

        let config = ServiceConfig::default().with_base_url("ftp://example.com");
        assert!(matches!(config.validate(), Err(SearchError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_sources() {
        let config = ServiceConfig::default().with_sources(vec![]);
        assert!(matches!(config.validate(), Err(SearchError::Config(_))));
    }

    #[test]
    fn test_build_keeps_registry_order() {
        let config = ServiceConfig::default()
            .with_sources(vec![Source::PjTc, Source::Pucp, Source::PjTc])
            .with_policy(AggregationPolicy::BestEffort);
        let search = config.build().unwrap();
        assert_eq!(search.source_names(), vec!["PUCP", "PJ/TC"]);
        assert_eq!(search.policy(), AggregationPolicy::BestEffort);
    }

    #[test]
    fn test_build_with_custom_timeouts() {
        let config = ServiceConfig::default().with_fetcher(
            FetcherConfig::default()
                .with_timeout(Duration::from_secs(5))
                .with_connect_timeout(Duration::from_secs(2)),
        );
        let search = config.build().unwrap();
        assert_eq!(search.source_count(), 3);
    }

    #[test]
    fn test_build_rejects_bad_markup() {
        let mut config = ServiceConfig::default();
        config.web_markup.container = "div[".to_string();
        assert!(matches!(config.build(), Err(SearchError::Parse(_))));
    }

    #[test]
    fn test_parse_sources() {
        let sources = parse_sources(&["PUCP", "pjtc"]).unwrap();
        assert_eq!(sources, vec![Source::Pucp, Source::PjTc]);
        assert!(matches!(parse_sources(&["bing"]), Err(SearchError::Config(_))));
    }
}
