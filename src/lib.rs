//! ridex - A deterministic ride dispatch simulator
//!
//! Rides are tracked by a dual-indexed registry: ordered by id for lookups
//! and range scans, and by (cost, duration) for dispatch.

pub mod cli;
pub mod index;
pub mod observability;
pub mod protocol;
pub mod registry;
pub mod ride;
