//! venue-models CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`. Exit codes:
//! - 0: command completed
//! - 1: CLI error (config, I/O, unreadable input)
//! - 2: `validate` rejected the input

use std::process::ExitCode;

use venue_models::cli::{self, CommandOutcome};

fn main() -> ExitCode {
    match cli::run() {
        Ok(CommandOutcome::Completed) => ExitCode::SUCCESS,
        Ok(CommandOutcome::Rejected) => ExitCode::from(2),
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
