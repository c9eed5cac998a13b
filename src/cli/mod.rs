//! CLI module
//!
//! Provides command-line access to the entity transforms:
//! - construct: instances with derived fields
//! - unserialize: plain named-field records
//! - serialize: positional wire arrays
//! - validate: first-failure validation report

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, EntityKind, TransformArgs};
pub use commands::{execute, run, run_command, validation_report, CommandOutcome};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_input, read_input, write_error, write_response};
