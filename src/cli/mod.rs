//! CLI module for ridex
//!
//! Provides command-line interface for:
//! - run: Execute a command script and write results
//! - check: Parse a command script without executing it

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, RunArgs};
pub use commands::{check, run, run_command, run_script};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{open_input, open_output, write_response};
