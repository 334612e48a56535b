//! Ordered merge of per-source results.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Result, SearchResponse, SearchResult, SourceFailure};

/// What to do when one source fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// The first failing source fails the whole search.
    #[default]
    FailFast,
    /// Failing sources contribute nothing and are reported in
    /// `SearchResponse::failed_sources`.
    BestEffort,
}

/// Outcome of one source's fetch-and-extract leg.
#[derive(Debug)]
pub struct LegOutcome {
    pub source: String,
    pub outcome: Result<Vec<SearchResult>>,
}

impl LegOutcome {
    pub fn new(source: impl Into<String>, outcome: Result<Vec<SearchResult>>) -> Self {
        Self {
            source: source.into(),
            outcome,
        }
    }
}

/// Flattens per-source result lists into one response.
#[derive(Debug, Default, Clone, Copy)]
pub struct Aggregator {
    policy: AggregationPolicy,
}

impl Aggregator {
    /// Creates a fail-fast aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: AggregationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    /// Concatenates `legs` in the order given, which must be source priority
    /// order. Results are never reordered or deduplicated.
    ///
    /// Under [`AggregationPolicy::FailFast`] the first failed leg (in source
    /// order) is returned as the error.
    pub fn aggregate(&self, term: &str, legs: Vec<LegOutcome>) -> Result<SearchResponse> {
        let mut response = SearchResponse::new(term);

        for leg in legs {
            match leg.outcome {
                Ok(results) => response.results.extend(results),
                Err(e) => match self.policy {
                    AggregationPolicy::FailFast => return Err(e),
                    AggregationPolicy::BestEffort => {
                        warn!("Source {} failed, continuing without it: {}", leg.source, e);
                        response.failed_sources.push(SourceFailure {
                            source: leg.source,
                            url: e.upstream_url().map(str::to_string),
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }

        Ok(response)
    }
}
