//! CLI argument definitions using clap
//!
//! Commands:
//! - ridex run <INPUT> [--config <path>] [--output <path>] [--log-level <level>] [--strict] [--verify] [--metrics]
//! - ridex check <INPUT>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// ridex - A deterministic ride dispatch simulator
#[derive(Parser, Debug)]
#[command(name = "ridex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a command script against a fresh registry
    Run(RunArgs),

    /// Parse a command script without executing it
    Check {
        /// Path to the command script
        input: PathBuf,
    },
}

/// Options for `ridex run`. Flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to the command script
    pub input: PathBuf,

    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where results go; "-" for stdout
    #[arg(long)]
    pub output: Option<String>,

    /// Minimum log severity (trace, info, warn, error, fatal)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Abort on lines that do not parse
    #[arg(long)]
    pub strict: bool,

    /// Check registry consistency after every command
    #[arg(long)]
    pub verify: bool,

    /// Report operation counters on stderr when the run ends
    #[arg(long)]
    pub metrics: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
