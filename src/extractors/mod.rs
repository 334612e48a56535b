//! Result page extractor implementations.

mod scholar;
mod web;

pub use scholar::{Scholar, DEFAULT_SCHOLAR_BASE};
pub use web::{Web, DEFAULT_WEB_BASE, MISSING_SNIPPET};
