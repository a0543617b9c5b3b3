//! Promptbatch: file-based prompt template library with batch execution.
//!
//! This is the main entry point for the `promptbatch` CLI. It parses
//! arguments, dispatches to the appropriate command handler, and handles
//! errors with proper exit codes.

mod cli;
mod commands;
pub mod batch;
pub mod config;
pub mod context;
pub mod csv;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod history;
pub mod store;
pub mod template;
pub mod varset;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
