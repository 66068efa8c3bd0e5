use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "benchgrid",
    about = "Benchmark result analyzer for PHP runtime comparisons (wrk output)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze one batch of multi-endpoint result files over a comparison grid
    Grid(GridArgs),

    /// Analyze flat single-run result files and rank runtimes
    Flat(FlatArgs),
}

#[derive(Debug, Args)]
pub struct GridArgs {
    /// Directory holding <runtime>-benchmark-<timestamp>.txt files
    #[arg(long, env = "BENCHGRID_DIR", default_value = ".")]
    pub(crate) dir: PathBuf,

    /// Timestamp suffix identifying the batch to analyze
    #[arg(long)]
    pub(crate) timestamp: String,

    /// Restrict the comparison to these endpoints (repeatable)
    #[arg(long = "endpoint", value_name = "NAME")]
    pub(crate) endpoints: Vec<String>,

    /// Restrict the comparison to these connection levels (repeatable)
    #[arg(long = "connections", value_name = "N")]
    pub(crate) connection_levels: Vec<u64>,

    /// Derive the grid from the data instead of the fixed default grid
    #[arg(long, default_value_t = false)]
    pub(crate) observed_grid: bool,
}

#[derive(Debug, Args)]
pub struct FlatArgs {
    /// Directory holding <runtime>-benchmark-<anything>.txt files
    #[arg(long, env = "BENCHGRID_DIR", default_value = ".")]
    pub(crate) dir: PathBuf,
}
