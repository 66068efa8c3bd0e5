use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

/// One result file on disk, with the runtime name its filename encodes
/// (the substring before the first `-`, e.g. `swoole-benchmark-x.txt`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResultFile {
    pub(crate) path: PathBuf,
    pub(crate) runtime: String,
}

/// Files for one grid batch: `<runtime>-benchmark-<timestamp>.txt`.
pub(crate) fn grid_files(dir: &Path, timestamp: &str) -> Result<Vec<ResultFile>> {
    let suffix = format!("-benchmark-{timestamp}.txt");
    list_result_files(dir, |name| name.ends_with(&suffix))
}

/// Files for a flat analysis: any `<runtime>-benchmark-*.txt`.
pub(crate) fn flat_files(dir: &Path) -> Result<Vec<ResultFile>> {
    list_result_files(dir, |name| {
        name.ends_with(".txt") && name.contains("-benchmark-")
    })
}

fn list_result_files(dir: &Path, matches: impl Fn(&str) -> bool) -> Result<Vec<ResultFile>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("read results directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !matches(name) {
            continue;
        }
        let Some(runtime) = runtime_name(name) else {
            continue;
        };

        files.push(ResultFile { path, runtime });
    }

    // Directory iteration order is platform-dependent; fix it.
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

fn runtime_name(file_name: &str) -> Option<String> {
    let (runtime, _) = file_name.split_once('-')?;
    if runtime.is_empty() {
        return None;
    }
    Some(runtime.to_string())
}
