//! Search orchestration: one concurrent fan-out per request.

use std::sync::Arc;
use std::time::Instant;

use futures::future::{join_all, try_join_all};
use tracing::{debug, warn};

use crate::aggregator::{AggregationPolicy, Aggregator, LegOutcome};
use crate::extractor::Extractor;
use crate::extractors::{Scholar, Web};
use crate::fetcher::PageFetcher;
use crate::query::build_query;
use crate::source::{ExtractorKind, SourceSpec};
use crate::{Result, SearchError, SearchRequest, SearchResponse, SearchResult};

/// One configured source with the extractor that parses its pages.
#[derive(Clone)]
struct Leg {
    spec: SourceSpec,
    extractor: Arc<dyn Extractor>,
}

/// Meta search that fans a term out to every configured source.
pub struct MetaSearch {
    fetcher: Arc<dyn PageFetcher>,
    legs: Vec<Leg>,
    aggregator: Aggregator,
}

impl MetaSearch {
    /// Creates a meta search with no sources.
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            legs: Vec::new(),
            aggregator: Aggregator::new(),
        }
    }

    /// Creates a meta search over the full source registry with the given
    /// extractors.
    pub fn with_registry(
        fetcher: Arc<dyn PageFetcher>,
        scholar: Arc<Scholar>,
        web: Arc<Web>,
    ) -> Result<Self> {
        let mut search = Self::new(fetcher);
        for spec in SourceSpec::registry() {
            let extractor: Arc<dyn Extractor> = match spec.kind {
                ExtractorKind::Scholar => scholar.clone() as Arc<dyn Extractor>,
                ExtractorKind::Web => web.clone() as Arc<dyn Extractor>,
            };
            search.add_source(spec, extractor)?;
        }
        Ok(search)
    }

    /// Appends a source. Results appear in the order sources were added.
    pub fn add_source(&mut self, spec: SourceSpec, extractor: Arc<dyn Extractor>) -> Result<()> {
        if spec.kind != extractor.kind() {
            return Err(SearchError::Config(format!(
                "source '{}' expects a {:?} extractor, got {:?}",
                spec.name,
                spec.kind,
                extractor.kind()
            )));
        }
        if self.legs.iter().any(|leg| leg.spec.name == spec.name) {
            return Err(SearchError::Config(format!(
                "source '{}' is already registered",
                spec.name
            )));
        }
        self.legs.push(Leg { spec, extractor });
        Ok(())
    }

    /// Sets how a failing source affects the response.
    pub fn set_policy(&mut self, policy: AggregationPolicy) {
        self.aggregator = Aggregator::with_policy(policy);
    }

    pub fn policy(&self) -> AggregationPolicy {
        self.aggregator.policy()
    }

    /// Returns the number of configured sources.
    pub fn source_count(&self) -> usize {
        self.legs.len()
    }

    /// Names of configured sources, in response order.
    pub fn source_names(&self) -> Vec<&str> {
        self.legs.iter().map(|leg| leg.spec.name.as_str()).collect()
    }

    /// Validates the request and queries all sources concurrently.
    ///
    /// No request is sent when the term is blank. Results are returned in
    /// source order regardless of which fetch completes first.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let term = request.validated_term()?;

        if self.legs.is_empty() {
            return Err(SearchError::Config("no sources configured".into()));
        }

        let start = Instant::now();
        debug!("Searching {} sources for {:?}", self.legs.len(), term);

        let futures = self.legs.iter().map(|leg| self.run_leg(leg, &term));

        let outcomes: Vec<LegOutcome> = match self.aggregator.policy() {
            AggregationPolicy::FailFast => try_join_all(futures)
                .await?
                .into_iter()
                .zip(&self.legs)
                .map(|(results, leg)| LegOutcome::new(leg.spec.name.clone(), Ok(results)))
                .collect(),
            AggregationPolicy::BestEffort => join_all(futures)
                .await
                .into_iter()
                .zip(&self.legs)
                .map(|(outcome, leg)| LegOutcome::new(leg.spec.name.clone(), outcome))
                .collect(),
        };

        let response = self.aggregator.aggregate(&term, outcomes)?;
        debug!(
            "Search for {:?} returned {} results in {}ms",
            term,
            response.results.len(),
            start.elapsed().as_millis()
        );
        Ok(response)
    }

    async fn run_leg(&self, leg: &Leg, term: &str) -> Result<Vec<SearchResult>> {
        let query = build_query(term, &leg.spec.domains);
        let url = leg.extractor.search_url(&query);

        let html = self.fetcher.fetch(&url).await?;

        if looks_like_bot_check(&html) {
            warn!(
                "{}: {} looks like a bot-check page; results will likely be empty",
                leg.spec.name, url
            );
        }

        let results = leg.extractor.extract(&html, &leg.spec);
        debug!("Source {} returned {} results", leg.spec.name, results.len());
        Ok(results)
    }
}

fn looks_like_bot_check(html: &str) -> bool {
    html.contains("/sorry/index") || html.contains("recaptcha") || html.contains("gs_captcha")
}
