//! # Folio Entry Point
//!
//! Parses arguments, runs the command, and maps failures to exit codes.
//! The actual work lives in `lib.rs` so the tests can drive it.

use clap::Parser;
use std::process::ExitCode;

use folio_cli::cli::Cli;
use folio_cli::error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match folio_cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let cli_error = err.downcast_ref::<CliError>();

            match cli_error.filter(|_| json).map(serde_json::to_string) {
                Some(Ok(body)) => println!("{body}"),
                _ => eprintln!("error: {err:#}"),
            }

            ExitCode::from(cli_error.map_or(1, |e| e.code.exit_code()))
        }
    }
}
