//! CLI command implementations
//!
//! `run` follows a fixed sequence:
//! 1. Configuration load (file, then flags)
//! 2. Logger setup
//! 3. Input and output open
//! 4. Session run under a `BATCH` observation scope
//! 5. Optional metrics report
//!
//! A duplicate insert ends the run early but is not a CLI failure.

use std::io::BufRead;
use std::path::Path;

use serde_json::json;

use super::args::{Command, RunArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{open_input, open_output, write_response};
use crate::observability::{log_event_with_fields, Event, Logger, ObservationScope, Severity};
use crate::protocol::{parse_bytes, Session, SessionError, SessionSummary};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Run(args) => run_script(&args).map(|_| ()),
        Command::Check { input } => check(&input),
    }
}

/// Execute a command script against a fresh registry
pub fn run_script(args: &RunArgs) -> CliResult<SessionSummary> {
    let config = Config::for_run(args)?;
    Logger::set_min_severity(config.severity()?);

    let input = args.input.to_string_lossy().into_owned();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("input", &input),
            ("output", &config.output_path),
            ("strict_parsing", &config.strict_parsing.to_string()),
            ("verify_invariants", &config.verify_invariants.to_string()),
        ],
    );

    let reader = open_input(&args.input)?;
    let mut writer = open_output(&config)?;

    let scope = ObservationScope::with_fields("BATCH", &[("input", &input)]);
    let mut session = Session::new(config.session_options());

    let summary = match session.run(reader, &mut writer) {
        Ok(summary) => summary,
        Err(e) => {
            if let SessionError::Invariant { line, source } = &e {
                log_event_with_fields(
                    Event::InvariantViolation,
                    &[("line", &line.to_string()), ("reason", &source.to_string())],
                );
            }
            scope.fail(&e.to_string());
            return Err(e.into());
        }
    };

    scope.complete_with_fields(&[
        ("commands", &summary.commands.to_string()),
        ("skipped", &summary.skipped.to_string()),
        ("aborted", &summary.aborted.to_string()),
    ]);

    if config.report_metrics {
        let fields = session.registry().metrics().snapshot().fields();
        let borrowed: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        Logger::force(Severity::Info, Event::MetricsReport.as_str(), &borrowed);
    }

    Ok(summary)
}

/// Parse a command script without executing it
///
/// Prints `{"commands": n, "lines": total}` on success.
pub fn check(input: &Path) -> CliResult<()> {
    let (commands, lines) = scan(open_input(input)?)?;
    write_response(json!({ "commands": commands, "lines": lines }))
}

/// Count parseable commands and total lines. Fails on the first bad line.
fn scan<R: BufRead>(reader: R) -> CliResult<(usize, usize)> {
    let mut commands = 0;
    let mut lines = 0;

    for (index, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        lines += 1;

        match parse_bytes(&raw) {
            Ok(Some(_)) => commands += 1,
            Ok(None) => {}
            Err(e) => {
                return Err(CliError::parse_error(format!("line {}: {}", index + 1, e)));
            }
        }
    }

    Ok((commands, lines))
}
