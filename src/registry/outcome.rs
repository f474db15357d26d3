//! Trip update decision table
//!
//! An update compares the new duration `n` with the current one `d`:
//!
//! | condition      | effect                                   |
//! |----------------|------------------------------------------|
//! | `n <= d`       | replace duration, cost unchanged         |
//! | `d < n < 2d`   | replace duration, cost + `COST_PENALTY`  |
//! | `n > 2d`       | decline (ride removed everywhere)        |
//! | `n == 2d`      | nothing happens                          |
//!
//! The `n == 2d` gap is intentional: such updates are logged and ignored.

use crate::ride::RideRecord;

/// Cost added when a trip grows by less than double.
pub const COST_PENALTY: u64 = 10;

/// Which branch of the decision table an update takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripChange {
    /// Duration replaced at the same cost
    Retime,
    /// Duration replaced and cost penalized
    Penalize,
    /// Ride declined and removed
    Decline,
    /// Exactly double: left as is
    Hold,
}

impl TripChange {
    /// Classify a duration change
    pub fn classify(old_duration: u64, new_duration: u64) -> Self {
        let doubled = u128::from(old_duration) * 2;
        let new = u128::from(new_duration);

        if new_duration <= old_duration {
            TripChange::Retime
        } else if new < doubled {
            TripChange::Penalize
        } else if new > doubled {
            TripChange::Decline
        } else {
            TripChange::Hold
        }
    }
}

/// Result of `RideRegistry::update`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Ride stays active with the new duration; carries the new record
    Retimed(RideRecord),
    /// Ride stays active with penalized cost; carries the new record
    Penalized(RideRecord),
    /// Ride was removed; carries the record as it was before removal
    Declined(RideRecord),
    /// New duration was exactly double; carries the untouched record
    Unchanged(RideRecord),
    /// No ride with that id
    Missing,
}
