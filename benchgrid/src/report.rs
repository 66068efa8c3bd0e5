use std::fmt::Write as _;

use benchgrid_core::{FlatRunCollection, GridSummary, rank_by_latency, rank_by_rps};

/// Ranked plain-text listing for a flat analysis: throughput descending,
/// latency ascending. Runtimes missing a metric are left out of that ranking.
pub(crate) fn render_rankings(runs: &FlatRunCollection) -> String {
    let mut out = String::new();

    out.push_str("Benchmark Results Summary\n");
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");

    let by_rps = rank_by_rps(runs);
    if !by_rps.is_empty() {
        out.push_str("Requests per Second:\n");
        for (i, (runtime, rps)) in by_rps.iter().enumerate() {
            writeln!(&mut out, "  {}. {runtime}: {rps:.2} req/s", i + 1).ok();
        }
        out.push('\n');
    }

    let by_latency = rank_by_latency(runs);
    if !by_latency.is_empty() {
        out.push_str("Average Latency:\n");
        for (i, (runtime, latency)) in by_latency.iter().enumerate() {
            writeln!(&mut out, "  {}. {runtime}: {latency:.2} ms", i + 1).ok();
        }
        out.push('\n');
    }

    out
}

/// Per-slice winners for a grid analysis, one row per recorded comparison.
pub(crate) fn render_grid_overview(summary: &GridSummary) -> String {
    let mut out = String::new();

    if summary.comparisons.is_empty() {
        out.push_str("no comparison slices (single runtime or no data on the grid)\n");
        return out;
    }

    out.push_str("endpoint             | conns |     best_rps | best_latency\n");
    out.push_str("---------------------+-------+--------------+--------------\n");

    for (endpoint, by_conns) in &summary.comparisons {
        for (connections, entry) in by_conns {
            writeln!(
                &mut out,
                "{endpoint:<21}| {connections:>5} | {:>12} | {:>12}",
                entry.best_rps, entry.best_latency
            )
            .ok();
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchgrid_core::{ComparisonGrid, MetricSet, RunCollection, RuntimeRuns, aggregate};

    fn metrics(rps: f64, latency: f64) -> MetricSet {
        MetricSet {
            requests_per_sec: Some(rps),
            latency_ms: Some(latency),
            ..Default::default()
        }
    }

    #[test]
    fn rankings_order_and_format() {
        let mut runs = FlatRunCollection::new();
        runs.insert("fpm".to_string(), metrics(2000.0, 20.0));
        runs.insert("swoole".to_string(), metrics(9000.0, 3.0));

        let text = render_rankings(&runs);
        let rps_pos = text.find("1. swoole: 9000.00 req/s");
        let fpm_pos = text.find("2. fpm: 2000.00 req/s");
        assert!(rps_pos.is_some());
        assert!(fpm_pos.is_some());
        assert!(rps_pos < fpm_pos);
        assert!(text.contains("1. swoole: 3.00 ms"));
    }

    #[test]
    fn rankings_skip_section_without_data() {
        let mut runs = FlatRunCollection::new();
        runs.insert(
            "swoole".to_string(),
            MetricSet {
                latency_ms: Some(3.0),
                ..Default::default()
            },
        );

        let text = render_rankings(&runs);
        assert!(!text.contains("Requests per Second"));
        assert!(text.contains("Average Latency"));
    }

    #[test]
    fn grid_overview_lists_each_slice() {
        let mut runs = RunCollection::new();
        for (name, rps, latency) in [("swoole", 9000.0, 3.0), ("fpm", 2000.0, 20.0)] {
            let mut runtime = RuntimeRuns::new(name);
            runtime
                .endpoints
                .entry("health".to_string())
                .or_default()
                .insert(400, metrics(rps, latency));
            runs.insert(name.to_string(), runtime);
        }

        let summary = match aggregate(runs, &ComparisonGrid::default(), "ts") {
            Ok(s) => s,
            Err(err) => panic!("aggregate failed: {err}"),
        };
        let text = render_grid_overview(&summary);
        assert!(text.contains("health"));
        assert!(text.contains("400"));
        assert!(text.contains("swoole"));
    }

    #[test]
    fn grid_overview_without_comparisons() {
        let mut runs = RunCollection::new();
        runs.insert("swoole".to_string(), RuntimeRuns::new("swoole"));

        let summary = match aggregate(runs, &ComparisonGrid::default(), "ts") {
            Ok(s) => s,
            Err(err) => panic!("aggregate failed: {err}"),
        };
        let text = render_grid_overview(&summary);
        assert!(text.contains("no comparison slices"));
    }
}
