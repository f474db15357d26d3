//! Ride value types
//!
//! A ride is an (id, cost, duration) triple. Records are immutable once
//! built; changing a ride's terms means building a new record.

mod record;

pub use record::{Priority, RideId, RideRecord, RideTerms};
