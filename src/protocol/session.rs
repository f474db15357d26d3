//! Session: drives a registry from a command script
//!
//! Commands run strictly one after another. Each command completes,
//! including all rebalancing, before the next line is read.

use std::io::{BufRead, Write};

use super::command::{parse_bytes, Command};
use super::errors::{SessionError, SessionResult};
use super::render::Response;
use crate::observability::{log_event_with_fields, Event};
use crate::registry::RideRegistry;

/// Knobs for a session run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Abort on unparseable lines instead of skipping them
    pub strict_parsing: bool,
    /// Run the full registry diagnostic after every command
    pub verify_invariants: bool,
}

/// What happened during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Commands executed, including the one that aborted the run
    pub commands: usize,
    /// Lines skipped as unparseable
    pub skipped: usize,
    /// Output lines written
    pub lines_written: usize,
    /// True if a duplicate insert ended the run early
    pub aborted: bool,
}

/// A registry plus the protocol loop around it
#[derive(Debug, Default)]
pub struct Session {
    registry: RideRegistry,
    options: SessionOptions,
}

impl Session {
    /// Create a session over an empty registry
    pub fn new(options: SessionOptions) -> Self {
        Self {
            registry: RideRegistry::new(),
            options,
        }
    }

    /// The registry this session drives
    pub fn registry(&self) -> &RideRegistry {
        &self.registry
    }

    /// Apply one command to the registry
    pub fn execute(&mut self, command: &Command) -> Response {
        match *command {
            Command::Insert { id, cost, duration } => match self.registry.insert(id, cost, duration) {
                Ok(_) => Response::Silent,
                Err(e) => Response::Duplicate(e.ride_id()),
            },
            Command::GetNextRide => Response::Dispatched(self.registry.get_next()),
            Command::Print { id } => Response::Ride(self.registry.get(id)),
            Command::PrintRange { lo, hi } => Response::Rides(self.registry.range(lo, hi)),
            Command::UpdateTrip { id, new_duration } => {
                self.registry.update(id, new_duration);
                Response::Silent
            }
            Command::Cancel { id } => {
                self.registry.cancel(id);
                Response::Silent
            }
        }
    }

    /// Read commands until end of input or a duplicate insert.
    ///
    /// Lines are read as raw bytes, so a line that is not UTF-8 is handled
    /// like any other unparseable line. Every produced line is written to
    /// `writer` as soon as its command finishes. The writer is flushed
    /// before returning.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, writer: &mut W) -> SessionResult<SessionSummary> {
        let mut summary = SessionSummary::default();

        for (index, raw) in reader.split(b'\n').enumerate() {
            let line_no = index + 1;
            let raw = raw?;

            let command = match parse_bytes(&raw) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(source) if self.options.strict_parsing => {
                    return Err(SessionError::Parse { line: line_no, source });
                }
                Err(source) => {
                    summary.skipped += 1;
                    log_event_with_fields(
                        Event::LineSkipped,
                        &[
                            ("line", &line_no.to_string()),
                            ("reason", &source.to_string()),
                        ],
                    );
                    continue;
                }
            };

            let response = self.execute(&command);
            summary.commands += 1;

            if let Some(text) = response.render() {
                writeln!(writer, "{}", text)?;
                summary.lines_written += 1;
            }

            if self.options.verify_invariants {
                self.registry
                    .verify()
                    .map_err(|source| SessionError::Invariant { line: line_no, source })?;
            }

            if response.is_terminal() {
                summary.aborted = true;
                log_event_with_fields(
                    Event::BatchAborted,
                    &[("line", &line_no.to_string()), ("command", &command.to_string())],
                );
                break;
            }
        }

        writer.flush()?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ProtocolError;
    use crate::ride::RideRecord;

    fn run_script(script: &str, options: SessionOptions) -> (SessionResult<SessionSummary>, String) {
        let mut session = Session::new(options);
        let mut out = Vec::new();
        let result = session.run(script.as_bytes(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_execute_maps_commands() {
        let mut session = Session::default();

        assert_eq!(
            session.execute(&Command::Insert { id: 1, cost: 10, duration: 5 }),
            Response::Silent
        );
        assert_eq!(
            session.execute(&Command::Print { id: 1 }),
            Response::Ride(Some(RideRecord::new(1, 10, 5)))
        );
        assert_eq!(
            session.execute(&Command::Insert { id: 1, cost: 3, duration: 3 }),
            Response::Duplicate(1)
        );
        assert_eq!(
            session.execute(&Command::UpdateTrip { id: 1, new_duration: 7 }),
            Response::Silent
        );
        assert_eq!(
            session.execute(&Command::GetNextRide),
            Response::Dispatched(Some(RideRecord::new(1, 20, 7)))
        );
        assert_eq!(session.execute(&Command::GetNextRide), Response::Dispatched(None));
    }

    #[test]
    fn test_run_writes_one_line_per_output() {
        let script = "Insert(5,50,120)\nInsert(3,30,60)\nPrint(3)\nPrint(1,10)\nCancel(3)\nGetNextRide()\nGetNextRide()\n";
        let (result, out) = run_script(script, SessionOptions::default());

        let summary = result.unwrap();
        assert_eq!(summary.commands, 7);
        assert_eq!(summary.lines_written, 4);
        assert!(!summary.aborted);
        assert_eq!(
            out,
            "(3,30,60)\n(3,30,60),(5,50,120)\n(5,50,120)\nNo active ride requests\n"
        );
    }

    #[test]
    fn test_run_stops_on_duplicate() {
        let script = "Insert(5,1,1)\nInsert(5,2,2)\nPrint(5)\n";
        let (result, out) = run_script(script, SessionOptions::default());

        let summary = result.unwrap();
        assert!(summary.aborted);
        assert_eq!(summary.commands, 2);
        assert_eq!(out, "Duplicate RideNumber\n");
    }

    #[test]
    fn test_lenient_mode_skips_bad_lines() {
        let script = "Insert(1,1,1)\nLaunch(2)\n\nPrint(1)\n";
        let (result, out) = run_script(script, SessionOptions::default());

        let summary = result.unwrap();
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.commands, 2);
        assert_eq!(out, "(1,1,1)\n");
    }

    #[test]
    fn test_lenient_mode_skips_invalid_utf8() {
        let mut script = b"Insert(1,1,1)\n".to_vec();
        script.extend_from_slice(&[0xff, 0xfe, b'\n']);
        script.extend_from_slice(b"Print(1)\n");

        let mut session = Session::default();
        let mut out = Vec::new();
        let summary = session.run(script.as_slice(), &mut out).unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.commands, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "(1,1,1)\n");
    }

    #[test]
    fn test_strict_mode_rejects_invalid_utf8() {
        let options = SessionOptions {
            strict_parsing: true,
            ..SessionOptions::default()
        };
        let mut session = Session::new(options);
        let mut out = Vec::new();
        let err = session
            .run(&b"Print(1)\nPrint(\xc3)\nPrint(1)\n"[..], &mut out)
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::Parse {
                line: 2,
                source: ProtocolError::InvalidEncoding { valid_up_to: 6 }
            }
        ));
        assert_eq!(String::from_utf8(out).unwrap(), "(0,0,0)\n");
    }

    #[test]
    fn test_strict_mode_reports_line() {
        let options = SessionOptions {
            strict_parsing: true,
            ..SessionOptions::default()
        };
        let (result, out) = run_script("Print(1)\nInsert(1,x,1)\n", options);

        let err = result.unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert_eq!(out, "(0,0,0)\n");
    }

    #[test]
    fn test_verify_mode_passes_on_valid_run() {
        let options = SessionOptions {
            verify_invariants: true,
            ..SessionOptions::default()
        };
        let script: String = (0..50)
            .map(|i| format!("Insert({},{},{})\n", (i * 37) % 101, i % 7, i))
            .chain((0..20).map(|_| "GetNextRide()\n".to_string()))
            .collect();

        let (result, _) = run_script(&script, options);
        assert_eq!(result.unwrap().commands, 70);
    }
}
