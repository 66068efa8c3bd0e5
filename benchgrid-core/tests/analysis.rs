//! End-to-end: batch text through extraction, aggregation and JSON shape.

use std::collections::BTreeMap;

use benchgrid_core::{
    ComparisonGrid, MetricSet, RunCollection, RuntimeRuns, aggregate, analyze, extract,
    extract_batch,
};

fn batch_text(runs: &[(&str, u64, f64, f64)]) -> String {
    let mut out = String::new();
    let mut last_endpoint = "";
    for (endpoint, conns, rps, latency_ms) in runs {
        if *endpoint != last_endpoint {
            out.push_str(&format!("Endpoint: {endpoint}\n"));
            last_endpoint = *endpoint;
        }
        out.push_str(&format!(
            "Connections: {conns}\n\
             Running 30s test @ http://app:8080/{endpoint} (wrk)\n\
             Latency   {latency_ms:.2}ms\n\
             {total} requests in 30.00s, 10.00MB read\n\
             Requests/sec:   {rps:.2}\n\
             Transfer/sec:      1.00MB\n\
             ---\n",
            total = (*rps * 30.0) as u64,
        ));
    }
    out
}

#[test]
fn single_run_extraction_example() {
    let text = "Requests/sec: 1500.25\nLatency 12.50ms\nTransfer/sec: 2.50MB\n10000 requests in 10s";
    let m = extract(text);
    assert_eq!(
        m,
        MetricSet {
            requests_per_sec: Some(1500.25),
            latency_ms: Some(12.5),
            transfer_mb_per_sec: Some(2.5),
            total_requests: Some(10000),
        }
    );
}

#[test]
fn batch_to_summary() {
    let swoole = batch_text(&[
        ("health", 100, 12000.0, 4.0),
        ("health", 400, 15000.0, 9.0),
        ("database", 400, 2500.0, 60.0),
    ]);
    let fpm = batch_text(&[
        ("health", 100, 5000.0, 11.0),
        ("health", 400, 5200.0, 40.0),
        ("database", 400, 2800.0, 52.0),
    ]);

    let mut runs = RunCollection::new();
    for (name, text) in [("swoole", &swoole), ("fpm", &fpm)] {
        let mut runtime = RuntimeRuns::new(name);
        runtime.endpoints = extract_batch(text);
        runs.insert(name.to_string(), runtime);
    }

    let grid = ComparisonGrid {
        endpoints: vec!["health".to_string(), "database".to_string()],
        connection_levels: vec![100, 400, 800],
    };
    let summary = match aggregate(runs, &grid, "20250101_120000") {
        Ok(s) => s,
        Err(err) => panic!("aggregate failed: {err}"),
    };

    assert_eq!(summary.timestamp, "20250101_120000");
    assert_eq!(summary.runtimes.len(), 2);

    let health = &summary.comparisons["health"];
    assert_eq!(health.len(), 2); // no data at 800 connections
    assert_eq!(health[&100].best_rps, "swoole");
    assert_eq!(health[&400].best_latency, "swoole");

    let database = &summary.comparisons["database"];
    assert_eq!(database[&400].best_rps, "fpm");
    assert_eq!(database[&400].best_latency, "fpm");
}

#[test]
fn grid_summary_json_shape() {
    let text = batch_text(&[("health", 100, 1000.0, 5.0)]);

    let mut runs = RunCollection::new();
    for name in ["swoole", "frankenphp"] {
        let mut runtime = RuntimeRuns::new(name);
        runtime.endpoints = extract_batch(&text);
        runs.insert(name.to_string(), runtime);
    }

    let summary = match aggregate(runs, &ComparisonGrid::default(), "ts") {
        Ok(s) => s,
        Err(err) => panic!("aggregate failed: {err}"),
    };
    let v = match serde_json::to_value(&summary) {
        Ok(v) => v,
        Err(err) => panic!("to_value failed: {err}"),
    };

    assert_eq!(
        v.pointer("/runtimes/swoole/endpoints/health/100/requests_per_sec")
            .and_then(serde_json::Value::as_f64),
        Some(1000.0)
    );
    // Identical metrics: ties resolve to the first runtime in sorted order.
    assert_eq!(
        v.pointer("/comparisons/health/100/best_rps")
            .and_then(serde_json::Value::as_str),
        Some("frankenphp")
    );
    // total_requests parses from the "<n> requests in" line.
    assert_eq!(
        v.pointer("/runtimes/swoole/endpoints/health/100/total_requests")
            .and_then(serde_json::Value::as_u64),
        Some(30000)
    );
}

#[test]
fn flat_summary_json_shape() {
    let mut runs: BTreeMap<String, MetricSet> = BTreeMap::new();
    runs.insert(
        "swoole".to_string(),
        extract("Requests/sec: 9000.00\nLatency 3.00ms\n"),
    );
    runs.insert(
        "fpm".to_string(),
        extract("Requests/sec: 2000.00\nLatency 20.00ms\n"),
    );

    let summary = match analyze(runs, "2025-01-01T12:00:00+00:00") {
        Ok(s) => s,
        Err(err) => panic!("analyze failed: {err}"),
    };
    let v = match serde_json::to_value(&summary) {
        Ok(v) => v,
        Err(err) => panic!("to_value failed: {err}"),
    };

    assert_eq!(
        v.pointer("/analysis/best_throughput")
            .and_then(serde_json::Value::as_str),
        Some("swoole")
    );
    assert_eq!(
        v.pointer("/analysis/best_latency")
            .and_then(serde_json::Value::as_str),
        Some("swoole")
    );
    assert_eq!(
        v.pointer("/results/fpm/latency_ms")
            .and_then(serde_json::Value::as_f64),
        Some(20.0)
    );
    assert!(v.pointer("/results/fpm/total_requests").is_none());
}
