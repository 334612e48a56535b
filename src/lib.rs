//! # metabuscador
//!
//! A legal meta search library: one search term is fanned out concurrently
//! to Google Scholar and Google Web Search, each query restricted to the
//! academic and judicial domains of a source (PUCP, UNMSM, PJ/TC), and the
//! parsed results are merged in a fixed source order.
//!
//! - Site-restricted query construction
//! - Tolerant HTML extraction with a per-source result cap
//! - Fail-fast or best-effort aggregation
//! - An axum endpoint (`POST /search`) and a CLI
//!
//! ## Example
//!
//! ```rust,no_run
//! use metabuscador::{config::ServiceConfig, SearchRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let search = ServiceConfig::default().build()?;
//!     let response = search.search(&SearchRequest::new("responsabilidad civil")).await?;
//!
//!     for result in &response.results {
//!         println!("[{}] {}: {}", result.source, result.title, result.link);
//!     }
//!     Ok(())
//! }
//! ```

mod aggregator;
mod error;
mod fetcher;
mod fetcher_http;
mod query;
mod result;
mod search;
mod source;

pub mod config;
pub mod document;
pub mod extractor;
pub mod extractors;
pub mod server;

pub use aggregator::{AggregationPolicy, Aggregator, LegOutcome};
pub use error::{Result, SearchError};
pub use extractor::Extractor;
pub use fetcher::{FetcherConfig, PageFetcher};
pub use fetcher_http::HttpFetcher;
pub use query::{build_query, search_url, SearchRequest, BLANK_TERM_MESSAGE};
pub use result::{SearchResponse, SearchResult, SourceFailure};
pub use search::MetaSearch;
pub use source::{link_matches_domains, ExtractorKind, Source, SourceSpec, MAX_RESULTS_PER_SOURCE};
