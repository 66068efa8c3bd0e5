use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalized measurements extracted from one benchmark run.
///
/// A field is `Some` only when the corresponding line was found in the raw
/// output. Absent is not zero: a runtime that never reported latency must not
/// rank as "0 ms". The `*_or_*` accessors exist for the comparison reducers
/// only and never leak sentinel values into serialized output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests_per_sec: Option<f64>,

    /// Mean latency, normalized to milliseconds regardless of the source unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,

    /// Transfer rate, normalized to MB/s regardless of the source unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_mb_per_sec: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_requests: Option<u64>,
}

impl MetricSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests_per_sec.is_none()
            && self.latency_ms.is_none()
            && self.transfer_mb_per_sec.is_none()
            && self.total_requests.is_none()
    }

    /// Throughput for max-comparison: a missing field loses to any real value.
    #[must_use]
    pub fn rps_or_zero(&self) -> f64 {
        self.requests_per_sec.unwrap_or(0.0)
    }

    /// Latency for min-comparison: a missing field loses to any real value.
    #[must_use]
    pub fn latency_or_inf(&self) -> f64 {
        self.latency_ms.unwrap_or(f64::INFINITY)
    }
}

/// One runtime's structured results: endpoint -> connections -> metrics.
///
/// Connection levels are numeric keys so map iteration is numeric, not
/// lexicographic ("800" sorting before "1000" style bugs).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeRuns {
    pub runtime: String,
    pub endpoints: BTreeMap<String, BTreeMap<u64, MetricSet>>,
}

impl RuntimeRuns {
    #[must_use]
    pub fn new(runtime: impl Into<String>) -> Self {
        Self {
            runtime: runtime.into(),
            endpoints: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, endpoint: &str, connections: u64) -> Option<&MetricSet> {
        self.endpoints.get(endpoint)?.get(&connections)
    }
}

/// All structured runs under comparison, keyed by runtime name.
///
/// BTreeMap fixes iteration order, which in turn fixes reducer tie-breaks:
/// when two runtimes report the same value, the first one in sorted order
/// wins.
pub type RunCollection = BTreeMap<String, RuntimeRuns>;

/// Flat flavor: one MetricSet per runtime, no endpoint/connections dimension.
pub type FlatRunCollection = BTreeMap<String, MetricSet>;
