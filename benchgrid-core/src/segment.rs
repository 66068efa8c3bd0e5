use std::collections::BTreeMap;

use crate::extract::extract;
use crate::metrics::MetricSet;

/// Segments a batch file holding many runs and extracts metrics per run.
///
/// Batch files interleave marker lines with raw wrk output:
///
/// ```text
/// Endpoint: health
/// Connections: 100
/// Running 30s test @ http://target/health (wrk)
///   ...wrk stats...
/// ---
/// Connections: 200
/// ...
/// Endpoint: database
/// ...
/// ```
///
/// Splitting is hierarchical: endpoint marker first, then connections marker
/// within each endpoint, then the measured window runs from the
/// `Running ... wrk ...` header to a line that is exactly `---`. A missing
/// terminator extends the window to the end of the enclosing segment.
/// Connections tokens that are not integers skip that block, and windows with
/// no recognizable metrics contribute nothing. No input shape is an error.
#[must_use]
pub fn extract_batch(text: &str) -> BTreeMap<String, BTreeMap<u64, MetricSet>> {
    let mut endpoints = BTreeMap::new();

    for section in split_sections(text, "Endpoint: ") {
        let Some((endpoint, body)) = section_head(section) else {
            continue;
        };

        let runs: &mut BTreeMap<u64, MetricSet> =
            endpoints.entry(endpoint.to_string()).or_default();

        for conn_section in split_sections(body, "Connections: ") {
            let Some((conn_token, conn_body)) = section_head(conn_section) else {
                continue;
            };
            let Ok(connections) = conn_token.parse::<u64>() else {
                continue;
            };

            let metrics = extract(measured_window(conn_body));
            if !metrics.is_empty() {
                runs.insert(connections, metrics);
            }
        }
    }

    endpoints.retain(|_, runs| !runs.is_empty());
    endpoints
}

/// Splits on a marker that starts a line; text before the first marker is
/// dropped. Each returned slice begins right after its marker and ends where
/// the next marker line begins.
fn split_sections<'a>(text: &'a str, marker: &str) -> Vec<&'a str> {
    // (start of marker's value, start of marker's line)
    let mut marks: Vec<(usize, usize)> = Vec::new();
    let mut offset = 0;

    for raw in text.split_inclusive('\n') {
        let line = raw.trim_end_matches(['\n', '\r']);
        let trimmed = line.trim_start();
        if trimmed.starts_with(marker) {
            let indent = line.len() - trimmed.len();
            marks.push((offset + indent + marker.len(), offset));
        }
        offset += raw.len();
    }

    let mut sections = Vec::with_capacity(marks.len());
    for (i, &(value_start, _)) in marks.iter().enumerate() {
        let end = marks.get(i + 1).map_or(text.len(), |&(_, line_start)| line_start);
        sections.push(&text[value_start..end]);
    }
    sections
}

/// First line is the marker's value, the rest is the section body.
fn section_head(section: &str) -> Option<(&str, &str)> {
    let (head, body) = section.split_once('\n').unwrap_or((section, ""));
    let head = head.trim();
    if head.is_empty() {
        return None;
    }
    Some((head, body))
}

/// The slice between the `Running ... wrk ...` header and the `---`
/// terminator. Without a header the window is empty; without a terminator it
/// runs to the end of the segment.
fn measured_window(body: &str) -> &str {
    let mut start: Option<usize> = None;
    let mut offset = 0;

    for raw in body.split_inclusive('\n') {
        let line_start = offset;
        offset += raw.len();
        let line = raw.trim_end_matches(['\n', '\r']);

        match start {
            None => {
                if line.contains("Running") && line.contains("wrk") {
                    start = Some(offset);
                }
            }
            Some(from) => {
                if line.trim() == "---" {
                    return &body[from..line_start];
                }
            }
        }
    }

    start.map_or("", |from| &body[from..])
}
