use std::sync::LazyLock;

use regex::Regex;

use crate::metrics::MetricSet;

static RPS_RE: LazyLock<Regex> = LazyLock::new(|| re(r"Requests/sec:\s+(\d+\.?\d*)"));
static LATENCY_RE: LazyLock<Regex> = LazyLock::new(|| re(r"Latency\s+(\d+\.?\d*)(us|ms|s)"));
static TRANSFER_RE: LazyLock<Regex> = LazyLock::new(|| re(r"Transfer/sec:\s+(\d+\.?\d*)(KB|MB|GB)"));
static TOTAL_RE: LazyLock<Regex> = LazyLock::new(|| re(r"(\d+) requests in"));

/// Patterns above are literals; a failure to compile is a programming error.
#[allow(clippy::unwrap_used)]
fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

/// Extracts normalized metrics from the raw output of one load-test run.
///
/// First positional match wins per metric; wrk prints latency both as a mean
/// and as percentile rows, and this deliberately picks up the mean (the first
/// occurrence). A pattern that never matches leaves the field `None` — the
/// caller decides whether a sparse set is acceptable. Never fails, even on
/// garbage input.
#[must_use]
pub fn extract(text: &str) -> MetricSet {
    let mut metrics = MetricSet::default();

    if let Some(caps) = RPS_RE.captures(text) {
        metrics.requests_per_sec = caps[1].parse::<f64>().ok();
    }

    if let Some(caps) = LATENCY_RE.captures(text) {
        if let Ok(value) = caps[1].parse::<f64>() {
            metrics.latency_ms = Some(match &caps[2] {
                "us" => value / 1000.0,
                "s" => value * 1000.0,
                _ => value,
            });
        }
    }

    if let Some(caps) = TRANSFER_RE.captures(text) {
        if let Ok(value) = caps[1].parse::<f64>() {
            metrics.transfer_mb_per_sec = Some(match &caps[2] {
                "KB" => value / 1024.0,
                "GB" => value * 1024.0,
                _ => value,
            });
        }
    }

    if let Some(caps) = TOTAL_RE.captures(text) {
        metrics.total_requests = caps[1].parse::<u64>().ok();
    }

    metrics
}
