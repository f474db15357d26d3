//! Observability events for ridex
//!
//! Every loggable occurrence is an explicit, typed event with a fixed
//! default severity.

use std::fmt;

use super::logger::Severity;

/// Observable events in ridex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded and validated
    ConfigLoaded,

    // Registry mutations
    /// Ride added to all indexes
    RideInserted,
    /// Ride removed by cancellation
    RideCancelled,
    /// Ride extracted for dispatch
    RideDispatched,
    /// Dispatch requested with nothing queued
    DispatchEmpty,
    /// Trip duration replaced at the same cost
    TripRetimed,
    /// Trip duration replaced with the cost penalty applied
    TripPenalized,
    /// Trip declined because the duration grew too much
    TripDeclined,
    /// Update landed exactly on the doubling boundary and was ignored
    TripUnchanged,
    /// Insert of an id that is already tracked
    DuplicateRide,

    // Script processing
    /// Input line could not be parsed and was skipped
    LineSkipped,
    /// Batch stopped before end of input (FATAL)
    BatchAborted,
    /// Registry diagnostics found a broken invariant (FATAL)
    InvariantViolation,
    /// End-of-run counter report
    MetricsReport,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::RideInserted => "RIDE_INSERTED",
            Event::RideCancelled => "RIDE_CANCELLED",
            Event::RideDispatched => "RIDE_DISPATCHED",
            Event::DispatchEmpty => "DISPATCH_EMPTY",
            Event::TripRetimed => "TRIP_RETIMED",
            Event::TripPenalized => "TRIP_PENALIZED",
            Event::TripDeclined => "TRIP_DECLINED",
            Event::TripUnchanged => "TRIP_UNCHANGED",
            Event::DuplicateRide => "DUPLICATE_RIDE",

            Event::LineSkipped => "LINE_SKIPPED",
            Event::BatchAborted => "BATCH_ABORTED",
            Event::InvariantViolation => "INVARIANT_VIOLATION",
            Event::MetricsReport => "METRICS_REPORT",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::BatchAborted | Event::InvariantViolation => Severity::Fatal,
            Event::DuplicateRide => Severity::Error,
            Event::LineSkipped | Event::TripUnchanged => Severity::Warn,
            Event::ConfigLoaded | Event::MetricsReport => Severity::Info,
            _ => Severity::Trace,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
