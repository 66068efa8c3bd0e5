mod cli;
mod discover;
mod exit_codes;
mod flat;
mod grid;
mod report;

use clap::Parser;

use crate::exit_codes::ExitCode;

fn main() {
    let cli = match cli::Cli::try_parse() {
        Ok(v) => v,
        Err(err) => {
            use clap::error::ErrorKind;
            let _ = err.print();
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success.as_i32(),
                _ => ExitCode::InvalidInput.as_i32(),
            };
            std::process::exit(code);
        }
    };

    let result = match cli.command {
        cli::Command::Grid(args) => grid::run(args),
        cli::Command::Flat(args) => flat::run(args),
    };

    let code = match result {
        Ok(code) => code.as_i32(),
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::RuntimeError.as_i32()
        }
    };

    std::process::exit(code);
}
