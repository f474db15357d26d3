//! Ride registry
//!
//! The registry owns the attribute table (id -> cost, duration) and the two
//! derived indexes, and is the only code that mutates them. Each public
//! operation updates all three before returning, so callers never observe
//! the indexes disagreeing with the table.
//!
//! # Operations
//!
//! - `insert(id, cost, duration)` - fails with RIDE_DUPLICATE_KEY on a known id
//! - `cancel(id)` - no-op for unknown ids
//! - `get_next()` - dispatch the cheapest ride, `None` when nothing is queued
//! - `update(id, new_duration)` - retime, penalize or decline
//! - `get(id)` / `range(lo, hi)` - read-only lookups
//!
//! The registry is single-threaded. Sharing it across threads means one
//! lock around the whole registry; the indexes cannot be locked separately.

mod errors;
mod manager;
mod outcome;

pub use errors::{RegistryError, RegistryErrorCode, RegistryResult};
pub use manager::RideRegistry;
pub use outcome::{TripChange, UpdateOutcome, COST_PENALTY};
