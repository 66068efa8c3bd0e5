use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use anyhow::{Context as _, Result};
use benchgrid_core::{ComparisonGrid, RunCollection, RuntimeRuns, aggregate, extract_batch};

use crate::cli::GridArgs;
use crate::discover;
use crate::exit_codes::ExitCode;
use crate::report;

pub(crate) fn run(args: GridArgs) -> Result<ExitCode> {
    let files = discover::grid_files(&args.dir, &args.timestamp)?;
    if files.is_empty() {
        eprintln!(
            "no benchmark files found for timestamp {} in {}",
            args.timestamp,
            args.dir.display()
        );
        return Ok(ExitCode::NoInput);
    }

    let mut runs = RunCollection::new();
    for file in &files {
        let text = std::fs::read_to_string(&file.path)
            .with_context(|| format!("read {}", file.path.display()))?;

        let mut runtime = RuntimeRuns::new(&file.runtime);
        runtime.endpoints = extract_batch(&text);
        runs.insert(file.runtime.clone(), runtime);
    }

    let grid = resolve_grid(&args, &runs);
    let summary =
        aggregate(runs, &grid, args.timestamp.clone()).context("aggregate grid results")?;

    let summary_path = args.dir.join(format!("summary-{}.json", args.timestamp));
    write_json(&summary_path, &summary)?;
    println!("summary analysis saved to: {}", summary_path.display());

    println!();
    print!("{}", report::render_grid_overview(&summary));

    Ok(ExitCode::Success)
}

fn resolve_grid(args: &GridArgs, runs: &RunCollection) -> ComparisonGrid {
    if args.observed_grid {
        return ComparisonGrid::observed(runs);
    }

    let mut grid = ComparisonGrid::default();
    if !args.endpoints.is_empty() {
        grid.endpoints = args.endpoints.clone();
    }
    if !args.connection_levels.is_empty() {
        grid.connection_levels = args.connection_levels.clone();
    }
    grid
}

pub(crate) fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("serialize {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))
}
