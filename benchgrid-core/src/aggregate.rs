use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics::{FlatRunCollection, MetricSet, RunCollection};

#[derive(Debug, Error)]
pub enum AggregateError {
    /// No runs at all: nothing to compare, no summary is produced.
    #[error("no benchmark runs to aggregate")]
    EmptyCollection,
}

/// The (endpoint, connections) enumeration the comparison iterates over.
///
/// The grid is caller configuration, not something discovered as a side
/// effect: restricting a comparison to a known subset of coordinates is an
/// explicit choice. `observed` derives the full grid from the data when no
/// restriction is wanted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonGrid {
    pub endpoints: Vec<String>,
    pub connection_levels: Vec<u64>,
}

impl Default for ComparisonGrid {
    fn default() -> Self {
        Self {
            endpoints: [
                "health",
                "database",
                "cache",
                "file-read",
                "file-write",
                "api-external",
            ]
            .map(String::from)
            .to_vec(),
            connection_levels: vec![100, 200, 400, 800],
        }
    }
}

impl ComparisonGrid {
    /// Every endpoint and connection level present anywhere in the data.
    #[must_use]
    pub fn observed(runs: &RunCollection) -> Self {
        let mut endpoints: Vec<String> = Vec::new();
        let mut levels: Vec<u64> = Vec::new();

        for runtime in runs.values() {
            for (endpoint, by_conns) in &runtime.endpoints {
                if !endpoints.contains(endpoint) {
                    endpoints.push(endpoint.clone());
                }
                for conns in by_conns.keys() {
                    if !levels.contains(conns) {
                        levels.push(*conns);
                    }
                }
            }
        }

        endpoints.sort();
        levels.sort_unstable();
        Self {
            endpoints,
            connection_levels: levels,
        }
    }
}

/// One comparison slice: every runtime's metrics at a fixed
/// (endpoint, connections) coordinate, plus the winners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub metrics: BTreeMap<String, MetricSet>,
    pub best_rps: String,
    pub best_latency: String,
}

/// Aggregator output for structured (endpoint x connections) collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSummary {
    pub timestamp: String,
    pub runtimes: RunCollection,
    pub comparisons: BTreeMap<String, BTreeMap<u64, ComparisonEntry>>,
}

/// Aggregator output for flat collections: two global winners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatSummary {
    pub timestamp: String,
    pub results: FlatRunCollection,
    pub analysis: FlatAnalysis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatAnalysis {
    pub best_throughput: String,
    pub best_latency: String,
}

/// Builds the comparison summary over a fixed coordinate grid.
///
/// A coordinate where no runtime has data produces no entry (sparse, not an
/// error). With a single runtime there is nothing to compare and the
/// comparisons map stays empty. Ties on best_rps/best_latency resolve to the
/// first runtime in the collection's sorted iteration order.
pub fn aggregate(
    runs: RunCollection,
    grid: &ComparisonGrid,
    timestamp: impl Into<String>,
) -> Result<GridSummary, AggregateError> {
    if runs.is_empty() {
        return Err(AggregateError::EmptyCollection);
    }

    let mut comparisons: BTreeMap<String, BTreeMap<u64, ComparisonEntry>> = BTreeMap::new();

    if runs.len() > 1 {
        for endpoint in &grid.endpoints {
            for &connections in &grid.connection_levels {
                let slice: BTreeMap<String, MetricSet> = runs
                    .iter()
                    .filter_map(|(name, runtime)| {
                        runtime
                            .get(endpoint, connections)
                            .map(|m| (name.clone(), m.clone()))
                    })
                    .collect();

                if let Some(entry) = compare_slice(&slice) {
                    comparisons
                        .entry(endpoint.clone())
                        .or_default()
                        .insert(connections, entry);
                }
            }
        }
    }

    Ok(GridSummary {
        timestamp: timestamp.into(),
        runtimes: runs,
        comparisons,
    })
}

fn compare_slice(slice: &BTreeMap<String, MetricSet>) -> Option<ComparisonEntry> {
    let best_rps = reduce_best(slice, |m| m.rps_or_zero(), f64::gt)?;
    let best_latency = reduce_best(slice, |m| m.latency_or_inf(), f64::lt)?;

    Some(ComparisonEntry {
        metrics: slice.clone(),
        best_rps,
        best_latency,
    })
}

/// Global winners over a flat collection, same missing-field conventions as
/// the grid comparison.
pub fn analyze(
    runs: FlatRunCollection,
    timestamp: impl Into<String>,
) -> Result<FlatSummary, AggregateError> {
    let best_throughput =
        reduce_best(&runs, |m| m.rps_or_zero(), f64::gt).ok_or(AggregateError::EmptyCollection)?;
    let best_latency = reduce_best(&runs, |m| m.latency_or_inf(), f64::lt)
        .ok_or(AggregateError::EmptyCollection)?;

    Ok(FlatSummary {
        timestamp: timestamp.into(),
        results: runs,
        analysis: FlatAnalysis {
            best_throughput,
            best_latency,
        },
    })
}

/// First entry wins ties: `better` must be a strict comparison.
fn reduce_best(
    slice: &BTreeMap<String, MetricSet>,
    key: impl Fn(&MetricSet) -> f64,
    better: impl Fn(&f64, &f64) -> bool,
) -> Option<String> {
    let mut best: Option<(&str, f64)> = None;
    for (name, metrics) in slice {
        let value = key(metrics);
        match best {
            Some((_, best_value)) if !better(&value, &best_value) => {}
            _ => best = Some((name.as_str(), value)),
        }
    }
    best.map(|(name, _)| name.to_string())
}

/// Runtimes ranked by throughput, highest first. Runtimes missing the field
/// are left out rather than ranked at zero.
#[must_use]
pub fn rank_by_rps(runs: &FlatRunCollection) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = runs
        .iter()
        .filter_map(|(name, m)| m.requests_per_sec.map(|rps| (name.clone(), rps)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

/// Runtimes ranked by latency, lowest first. Runtimes missing the field are
/// left out.
#[must_use]
pub fn rank_by_latency(runs: &FlatRunCollection) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = runs
        .iter()
        .filter_map(|(name, m)| m.latency_ms.map(|lat| (name.clone(), lat)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}
