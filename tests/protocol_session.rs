//! Protocol Session Tests
//!
//! End-to-end tests for command scripts:
//! - Output text for every command
//! - Early stop on a duplicate insert
//! - Lenient and strict handling of bad lines, including non-UTF-8 bytes

use ridex::protocol::{Session, SessionError, SessionOptions, SessionSummary};

// =============================================================================
// Helper Functions
// =============================================================================

fn run(script: &str, options: SessionOptions) -> (SessionSummary, String) {
    let mut session = Session::new(options);
    let mut out = Vec::new();
    let summary = session.run(script.as_bytes(), &mut out).unwrap();
    (summary, String::from_utf8(out).unwrap())
}

fn verifying() -> SessionOptions {
    SessionOptions {
        verify_invariants: true,
        ..SessionOptions::default()
    }
}

// =============================================================================
// Full Script Tests
// =============================================================================

/// A mixed script exercising every command, ending on a duplicate.
#[test]
fn test_full_script_output() {
    let script = "\
Insert(25,98,46)
GetNextRide()
GetNextRide()
Insert(42,17,89)
Insert(9,76,31)
Insert(53,97,22)
GetNextRide()
Insert(68,40,51)
GetNextRide()
Print(9)
Insert(96,28,82)
Insert(73,28,56)
Insert(20,49,59)
Insert(62,7,10)
Cancel(20)
Insert(25,49,46)
UpdateTrip(62,15)
GetNextRide()
Print(1,100)
Insert(53,28,19)
Print(9)
";

    let (summary, out) = run(script, verifying());

    assert!(summary.aborted);
    assert_eq!(summary.commands, 20);
    assert_eq!(
        out,
        "\
(25,98,46)
No active ride requests
(42,17,89)
(68,40,51)
(9,76,31)
(62,17,15)
(9,76,31),(25,49,46),(53,97,22),(73,28,56),(96,28,82)
Duplicate RideNumber
"
    );
}

/// Declined and unchanged updates, observed through Print.
#[test]
fn test_update_effects_visible() {
    let script = "\
Insert(1,50,10)
Insert(2,50,10)
Insert(3,50,10)
UpdateTrip(1,21)
UpdateTrip(2,20)
UpdateTrip(3,12)
UpdateTrip(4,1)
Print(1)
Print(2)
Print(3)
";

    let (summary, out) = run(script, verifying());

    assert!(!summary.aborted);
    assert_eq!(out, "(0,0,0)\n(2,50,10)\n(3,60,12)\n");
}

/// Cancelling unknown ids and querying an empty registry are quiet.
#[test]
fn test_empty_registry_queries() {
    let (summary, out) = run("Cancel(4)\nPrint(4)\nPrint(1,10)\nGetNextRide()\n", verifying());

    assert_eq!(summary.commands, 4);
    assert_eq!(out, "(0,0,0)\n(0,0,0)\nNo active ride requests\n");
}

// =============================================================================
// Bad Input Tests
// =============================================================================

/// Lenient mode skips unknown and malformed lines.
#[test]
fn test_lenient_skips() {
    let script = "Insert(1,2,3)\nHello\nInsert(2,x,3)\nPrint(1,2)\n";
    let (summary, out) = run(script, SessionOptions::default());

    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.commands, 2);
    assert_eq!(out, "(1,2,3)\n");
}

/// Strict mode stops at the first bad line and keeps earlier output.
#[test]
fn test_strict_stops() {
    let options = SessionOptions {
        strict_parsing: true,
        ..SessionOptions::default()
    };
    let mut session = Session::new(options);
    let mut out = Vec::new();

    let err = session
        .run("Insert(1,2,3)\nPrint(1)\nUpdateTrip(1)\nPrint(1)\n".as_bytes(), &mut out)
        .unwrap_err();

    assert!(matches!(err, SessionError::Parse { line: 3, .. }));
    assert_eq!(String::from_utf8(out).unwrap(), "(1,2,3)\n");
    assert!(session.registry().contains(1));
}

/// A line with bytes that are not UTF-8 is skipped like any bad line.
#[test]
fn test_invalid_utf8_line_is_skipped() {
    let mut script = b"Insert(1,1,1)\n".to_vec();
    script.extend_from_slice(&[0xff, 0xfe, b'\n']);
    script.extend_from_slice(b"Insert(2,1,2)\nPrint(1,2)\n");

    let mut session = Session::new(SessionOptions::default());
    let mut out = Vec::new();
    let summary = session.run(script.as_slice(), &mut out).unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.commands, 3);
    assert_eq!(String::from_utf8(out).unwrap(), "(1,1,1),(2,1,2)\n");
}
