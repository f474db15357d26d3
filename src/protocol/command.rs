//! Command line parsing
//!
//! Grammar: `Name(arg, arg, ...)`, whitespace allowed around tokens,
//! arguments are non-negative base-10 integers.

use std::fmt;
use std::str::FromStr;

use super::errors::ProtocolError;
use crate::ride::RideId;

/// A parsed registry command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `Insert(id,cost,duration)`
    Insert { id: RideId, cost: u64, duration: u64 },
    /// `GetNextRide()`
    GetNextRide,
    /// `Print(id)`
    Print { id: RideId },
    /// `Print(lo,hi)`
    PrintRange { lo: RideId, hi: RideId },
    /// `UpdateTrip(id,duration)`
    UpdateTrip { id: RideId, new_duration: u64 },
    /// `Cancel(id)`
    Cancel { id: RideId },
}

impl Command {
    /// Protocol name of the command
    pub fn name(&self) -> &'static str {
        match self {
            Command::Insert { .. } => "Insert",
            Command::GetNextRide => "GetNextRide",
            Command::Print { .. } | Command::PrintRange { .. } => "Print",
            Command::UpdateTrip { .. } => "UpdateTrip",
            Command::Cancel { .. } => "Cancel",
        }
    }
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let open = line
            .find('(')
            .ok_or_else(|| ProtocolError::Malformed(line.to_string()))?;
        let body = line[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| ProtocolError::Malformed(line.to_string()))?;

        let raw_args: Vec<&str> = if body.trim().is_empty() {
            Vec::new()
        } else {
            body.split(',').map(str::trim).collect()
        };

        match line[..open].trim() {
            "Insert" => {
                let [id, cost, duration] = numbers::<3>("Insert", "3", &raw_args)?;
                Ok(Command::Insert { id, cost, duration })
            }
            "GetNextRide" => {
                numbers::<0>("GetNextRide", "0", &raw_args)?;
                Ok(Command::GetNextRide)
            }
            "Print" => match raw_args.len() {
                1 => {
                    let [id] = numbers::<1>("Print", "1 or 2", &raw_args)?;
                    Ok(Command::Print { id })
                }
                _ => {
                    let [lo, hi] = numbers::<2>("Print", "1 or 2", &raw_args)?;
                    Ok(Command::PrintRange { lo, hi })
                }
            },
            "UpdateTrip" => {
                let [id, new_duration] = numbers::<2>("UpdateTrip", "2", &raw_args)?;
                Ok(Command::UpdateTrip { id, new_duration })
            }
            "Cancel" => {
                let [id] = numbers::<1>("Cancel", "1", &raw_args)?;
                Ok(Command::Cancel { id })
            }
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }
}

/// Renders back to protocol text, e.g. `Insert(1,2,3)`.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Insert { id, cost, duration } => write!(f, "Insert({},{},{})", id, cost, duration),
            Command::GetNextRide => write!(f, "GetNextRide()"),
            Command::Print { id } => write!(f, "Print({})", id),
            Command::PrintRange { lo, hi } => write!(f, "Print({},{})", lo, hi),
            Command::UpdateTrip { id, new_duration } => write!(f, "UpdateTrip({},{})", id, new_duration),
            Command::Cancel { id } => write!(f, "Cancel({})", id),
        }
    }
}

/// Parse one script line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ProtocolError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    line.parse().map(Some)
}

/// Parse one raw script line as read from the input, newline excluded.
///
/// Bytes that are not UTF-8 make the line unparseable, like any other
/// bad line.
pub fn parse_bytes(raw: &[u8]) -> Result<Option<Command>, ProtocolError> {
    let line = std::str::from_utf8(raw).map_err(|e| ProtocolError::InvalidEncoding {
        valid_up_to: e.valid_up_to(),
    })?;
    parse_line(line)
}

fn numbers<const N: usize>(
    command: &'static str,
    expected: &'static str,
    raw: &[&str],
) -> Result<[u64; N], ProtocolError> {
    if raw.len() != N {
        return Err(ProtocolError::WrongArity {
            command,
            expected,
            found: raw.len(),
        });
    }

    let mut out = [0u64; N];
    for (slot, value) in out.iter_mut().zip(raw) {
        *slot = value.parse().map_err(|_| ProtocolError::InvalidNumber {
            command,
            value: value.to_string(),
        })?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_command() {
        assert_eq!(
            "Insert(25,98,46)".parse::<Command>().unwrap(),
            Command::Insert { id: 25, cost: 98, duration: 46 }
        );
        assert_eq!("GetNextRide()".parse::<Command>().unwrap(), Command::GetNextRide);
        assert_eq!("Print(9)".parse::<Command>().unwrap(), Command::Print { id: 9 });
        assert_eq!(
            "Print(1,100)".parse::<Command>().unwrap(),
            Command::PrintRange { lo: 1, hi: 100 }
        );
        assert_eq!(
            "UpdateTrip(53,15)".parse::<Command>().unwrap(),
            Command::UpdateTrip { id: 53, new_duration: 15 }
        );
        assert_eq!("Cancel(20)".parse::<Command>().unwrap(), Command::Cancel { id: 20 });
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        assert_eq!(
            "  Insert( 1 , 2 ,3 )\r".parse::<Command>().unwrap(),
            Command::Insert { id: 1, cost: 2, duration: 3 }
        );
        assert_eq!("GetNextRide( )".parse::<Command>().unwrap(), Command::GetNextRide);
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["Insert(1,2,3)", "GetNextRide()", "Print(4)", "Print(1,9)", "UpdateTrip(3,8)", "Cancel(7)"] {
            assert_eq!(text.parse::<Command>().unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            "Launch(1)".parse::<Command>().unwrap_err(),
            ProtocolError::UnknownCommand("Launch".into())
        );
    }

    #[test]
    fn test_malformed_syntax() {
        assert!(matches!("Insert 1,2,3".parse::<Command>(), Err(ProtocolError::Malformed(_))));
        assert!(matches!("Insert(1,2,3".parse::<Command>(), Err(ProtocolError::Malformed(_))));
    }

    #[test]
    fn test_wrong_arity() {
        assert_eq!(
            "Insert(1,2)".parse::<Command>().unwrap_err(),
            ProtocolError::WrongArity { command: "Insert", expected: "3", found: 2 }
        );
        assert!(matches!(
            "Print(1,2,3)".parse::<Command>(),
            Err(ProtocolError::WrongArity { found: 3, .. })
        ));
        assert!(matches!(
            "GetNextRide(1)".parse::<Command>(),
            Err(ProtocolError::WrongArity { found: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_number() {
        assert_eq!(
            "Cancel(-4)".parse::<Command>().unwrap_err(),
            ProtocolError::InvalidNumber { command: "Cancel", value: "-4".into() }
        );
        assert!(matches!(
            "Print()".parse::<Command>(),
            Err(ProtocolError::WrongArity { found: 0, .. })
        ));
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        assert_eq!(
            parse_bytes(&[b'C', 0xff, 0xfe]).unwrap_err(),
            ProtocolError::InvalidEncoding { valid_up_to: 1 }
        );
        assert_eq!(parse_bytes(b"Print(3)\r").unwrap(), Some(Command::Print { id: 3 }));
        assert_eq!(parse_bytes(b"").unwrap(), None);
    }

    #[test]
    fn test_parse_line_skips_blank() {
        assert_eq!(parse_line("   \n").unwrap(), None);
        assert_eq!(parse_line("Cancel(1)\n").unwrap(), Some(Command::Cancel { id: 1 }));
    }
}
