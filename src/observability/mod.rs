//! Observability subsystem for ridex
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed events with fixed severities
//! - Operational counters
//!
//! # Principles
//!
//! 1. Observability is read-only: it never changes registry state
//! 2. Synchronous, no background threads
//! 3. Deterministic output (sorted field order)
//!
//! # Usage
//!
//! ```ignore
//! use ridex::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::RideInserted, &[("ride_id", "7")]);
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::{ObservationScope, Timer};

/// Log an event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
