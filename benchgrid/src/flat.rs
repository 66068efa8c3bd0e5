use anyhow::{Context as _, Result};
use benchgrid_core::{FlatRunCollection, analyze, extract};
use chrono::Local;

use crate::cli::FlatArgs;
use crate::discover;
use crate::exit_codes::ExitCode;
use crate::grid::write_json;
use crate::report;

pub(crate) fn run(args: FlatArgs) -> Result<ExitCode> {
    let files = discover::flat_files(&args.dir)?;
    if files.is_empty() {
        eprintln!("no benchmark result files found in {}", args.dir.display());
        return Ok(ExitCode::NoInput);
    }

    let mut runs = FlatRunCollection::new();
    for file in &files {
        let text = std::fs::read_to_string(&file.path)
            .with_context(|| format!("read {}", file.path.display()))?;

        // A file yielding no metrics at all is dropped, not an error.
        let metrics = extract(&text);
        if !metrics.is_empty() {
            runs.insert(file.runtime.clone(), metrics);
        }
    }

    if runs.is_empty() {
        eprintln!("no valid results found in {}", args.dir.display());
        return Ok(ExitCode::NoInput);
    }

    print!("{}", report::render_rankings(&runs));

    let timestamp = Local::now().to_rfc3339();
    let summary = analyze(runs, timestamp).context("analyze flat results")?;

    let summary_path = args.dir.join("analysis-summary.json");
    write_json(&summary_path, &summary)?;
    println!("detailed analysis saved to: {}", summary_path.display());

    Ok(ExitCode::Success)
}
