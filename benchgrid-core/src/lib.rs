//! Parsing and aggregation core for PHP runtime benchmark comparisons.
//!
//! Two stateless pieces: [`extract`]/[`extract_batch`] turn raw load-generator
//! output into normalized [`MetricSet`]s, and [`aggregate`]/[`analyze`] turn a
//! keyed collection of those into a comparison summary. Neither does any I/O;
//! file discovery, JSON persistence and report printing live in the
//! `benchgrid` binary.

mod aggregate;
mod extract;
mod metrics;
mod segment;

pub use aggregate::{
    AggregateError, ComparisonEntry, ComparisonGrid, FlatAnalysis, FlatSummary, GridSummary,
    aggregate, analyze, rank_by_latency, rank_by_rps,
};
pub use extract::extract;
pub use metrics::{FlatRunCollection, MetricSet, RunCollection, RuntimeRuns};
pub use segment::extract_batch;
