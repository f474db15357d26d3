//! Metrics registry for ridex
//!
//! - Counters only, plus one gauge for the number of active rides
//! - Counters increase monotonically and reset only with the registry
//! - Atomic, so counting works through `&self` on read paths

use std::sync::atomic::{AtomicU64, Ordering};

/// Operational counters for a ride registry
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Successful inserts
    rides_inserted: AtomicU64,
    /// Rejected duplicate inserts
    duplicates_rejected: AtomicU64,
    /// Cancellations of tracked rides
    rides_cancelled: AtomicU64,
    /// Rides extracted by dispatch
    rides_dispatched: AtomicU64,
    /// Dispatch calls that found no ride
    empty_dispatches: AtomicU64,
    /// Updates that shortened or kept the duration
    trips_retimed: AtomicU64,
    /// Updates that applied the cost penalty
    trips_penalized: AtomicU64,
    /// Updates that declined the ride
    trips_declined: AtomicU64,
    /// Updates ignored on the doubling boundary
    trips_unchanged: AtomicU64,
    /// Point lookups
    point_queries: AtomicU64,
    /// Range lookups
    range_queries: AtomicU64,
    /// Rides currently tracked (gauge)
    active_rides: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment successful inserts
    pub fn increment_inserted(&self) {
        self.rides_inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment rejected duplicates
    pub fn increment_duplicates(&self) {
        self.duplicates_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment cancellations
    pub fn increment_cancelled(&self) {
        self.rides_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment dispatched rides
    pub fn increment_dispatched(&self) {
        self.rides_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment dispatch calls on an empty queue
    pub fn increment_empty_dispatches(&self) {
        self.empty_dispatches.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment retimed trips
    pub fn increment_retimed(&self) {
        self.trips_retimed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment penalized trips
    pub fn increment_penalized(&self) {
        self.trips_penalized.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment declined trips
    pub fn increment_declined(&self) {
        self.trips_declined.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment ignored boundary updates
    pub fn increment_unchanged(&self) {
        self.trips_unchanged.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment point lookups
    pub fn increment_point_queries(&self) {
        self.point_queries.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment range lookups
    pub fn increment_range_queries(&self) {
        self.range_queries.fetch_add(1, Ordering::Relaxed);
    }

    /// Set the active ride gauge
    pub fn set_active(&self, count: u64) {
        self.active_rides.store(count, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            rides_inserted: self.rides_inserted.load(Ordering::Relaxed),
            duplicates_rejected: self.duplicates_rejected.load(Ordering::Relaxed),
            rides_cancelled: self.rides_cancelled.load(Ordering::Relaxed),
            rides_dispatched: self.rides_dispatched.load(Ordering::Relaxed),
            empty_dispatches: self.empty_dispatches.load(Ordering::Relaxed),
            trips_retimed: self.trips_retimed.load(Ordering::Relaxed),
            trips_penalized: self.trips_penalized.load(Ordering::Relaxed),
            trips_declined: self.trips_declined.load(Ordering::Relaxed),
            trips_unchanged: self.trips_unchanged.load(Ordering::Relaxed),
            point_queries: self.point_queries.load(Ordering::Relaxed),
            range_queries: self.range_queries.load(Ordering::Relaxed),
            active_rides: self.active_rides.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub rides_inserted: u64,
    pub duplicates_rejected: u64,
    pub rides_cancelled: u64,
    pub rides_dispatched: u64,
    pub empty_dispatches: u64,
    pub trips_retimed: u64,
    pub trips_penalized: u64,
    pub trips_declined: u64,
    pub trips_unchanged: u64,
    pub point_queries: u64,
    pub range_queries: u64,
    pub active_rides: u64,
}

impl MetricsSnapshot {
    /// Key/value pairs for structured logging
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("rides_inserted", self.rides_inserted.to_string()),
            ("duplicates_rejected", self.duplicates_rejected.to_string()),
            ("rides_cancelled", self.rides_cancelled.to_string()),
            ("rides_dispatched", self.rides_dispatched.to_string()),
            ("empty_dispatches", self.empty_dispatches.to_string()),
            ("trips_retimed", self.trips_retimed.to_string()),
            ("trips_penalized", self.trips_penalized.to_string()),
            ("trips_declined", self.trips_declined.to_string()),
            ("trips_unchanged", self.trips_unchanged.to_string()),
            ("point_queries", self.point_queries.to_string()),
            ("range_queries", self.range_queries.to_string()),
            ("active_rides", self.active_rides.to_string()),
        ]
    }
}
