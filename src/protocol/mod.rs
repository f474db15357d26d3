//! Text command protocol
//!
//! One command per line, rendered results one line per producing command:
//!
//! | input                         | registry call      | output                       |
//! |-------------------------------|--------------------|------------------------------|
//! | `Insert(id,cost,duration)`    | `insert`           | none, or `Duplicate RideNumber` (ends the run) |
//! | `GetNextRide()`               | `get_next`         | `(id,cost,duration)` or `No active ride requests` |
//! | `Print(id)`                   | `get`              | `(id,cost,duration)` or `(0,0,0)` |
//! | `Print(lo,hi)`                | `range`            | comma-joined rides or `(0,0,0)` |
//! | `UpdateTrip(id,duration)`     | `update`           | none                         |
//! | `Cancel(id)`                  | `cancel`           | none                         |

mod command;
mod errors;
mod render;
mod session;

pub use command::{parse_bytes, parse_line, Command};
pub use errors::{ProtocolError, SessionError, SessionResult};
pub use render::{Response, DUPLICATE_RIDE, EMPTY_RIDE, NO_ACTIVE_REQUESTS};
pub use session::{Session, SessionOptions, SessionSummary};
