//! RideRegistry: the attribute table plus both derived indexes
//!
//! # API
//!
//! - `insert(id, cost, duration)` - register a ride
//! - `cancel(id)` - drop a ride
//! - `get_next()` - dispatch the lowest (cost, duration) ride
//! - `update(id, new_duration)` - apply the trip decision table
//! - `get(id)` / `range(lo, hi)` - lookups
//! - `verify()` - full consistency diagnostic

use std::collections::HashMap;

use super::errors::{RegistryError, RegistryResult};
use super::outcome::{TripChange, UpdateOutcome, COST_PENALTY};
use crate::index::{IndexError, IndexResult, OrderedIndex, PriorityIndex};
use crate::observability::{log_event, log_event_with_fields, Event, Logger, MetricsRegistry};
use crate::ride::{RideId, RideRecord, RideTerms};

/// Dual-indexed ride registry.
///
/// The attribute table decides whether an id exists. The ordered index and
/// the priority index always hold exactly the same id set as the table.
#[derive(Debug, Default)]
pub struct RideRegistry {
    /// Ground truth: id -> (cost, duration)
    attributes: HashMap<RideId, RideTerms>,
    /// Rides ordered by id
    by_id: OrderedIndex,
    /// Rides ordered by (cost, duration)
    by_priority: PriorityIndex,
    metrics: MetricsRegistry,
}

impl RideRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active rides
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true if no ride is active
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Returns true if `id` is active
    pub fn contains(&self, id: RideId) -> bool {
        self.attributes.contains_key(&id)
    }

    /// Operational counters
    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Register a new ride.
    ///
    /// A known id is rejected with RIDE_DUPLICATE_KEY and nothing changes.
    pub fn insert(&mut self, id: RideId, cost: u64, duration: u64) -> RegistryResult<RideRecord> {
        if self.attributes.contains_key(&id) {
            self.metrics.increment_duplicates();
            log_event_with_fields(Event::DuplicateRide, &[("ride_id", &id.to_string())]);
            return Err(RegistryError::duplicate_key(id));
        }

        let record = RideRecord::new(id, cost, duration);
        self.attributes.insert(id, record.terms());
        self.by_id.insert(id);
        self.by_priority.insert(record);

        self.metrics.increment_inserted();
        self.sync_active_gauge();
        trace_ride(Event::RideInserted, &record);
        Ok(record)
    }

    /// Cancel a ride. Unknown ids are ignored.
    ///
    /// Returns the removed record.
    pub fn cancel(&mut self, id: RideId) -> Option<RideRecord> {
        let record = self.detach(id)?;
        self.metrics.increment_cancelled();
        trace_ride(Event::RideCancelled, &record);
        Some(record)
    }

    /// Dispatch the ride with the lowest (cost, duration).
    ///
    /// `None` means there are no active requests.
    pub fn get_next(&mut self) -> Option<RideRecord> {
        let Some(record) = self.by_priority.pop_min() else {
            self.metrics.increment_empty_dispatches();
            log_event(Event::DispatchEmpty);
            return None;
        };

        self.by_id.remove(record.id());
        self.attributes.remove(&record.id());

        self.metrics.increment_dispatched();
        self.sync_active_gauge();
        trace_ride(Event::RideDispatched, &record);
        Some(record)
    }

    /// The ride `get_next` would dispatch, without removing it
    pub fn peek_next(&self) -> Option<RideRecord> {
        self.by_priority.peek().copied()
    }

    /// Change a ride's trip duration.
    ///
    /// See `TripChange` for the decision table.
    pub fn update(&mut self, id: RideId, new_duration: u64) -> UpdateOutcome {
        let Some(terms) = self.attributes.get(&id).copied() else {
            return UpdateOutcome::Missing;
        };

        match TripChange::classify(terms.duration, new_duration) {
            TripChange::Retime => {
                let record = self.replace_terms(id, RideTerms::new(terms.cost, new_duration));
                self.metrics.increment_retimed();
                trace_ride(Event::TripRetimed, &record);
                UpdateOutcome::Retimed(record)
            }
            TripChange::Penalize => {
                let cost = terms.cost.saturating_add(COST_PENALTY);
                let record = self.replace_terms(id, RideTerms::new(cost, new_duration));
                self.metrics.increment_penalized();
                trace_ride(Event::TripPenalized, &record);
                UpdateOutcome::Penalized(record)
            }
            TripChange::Decline => {
                let record = RideRecord::from_terms(id, terms);
                self.detach(id);
                self.metrics.increment_declined();
                trace_ride(Event::TripDeclined, &record);
                UpdateOutcome::Declined(record)
            }
            TripChange::Hold => {
                let record = RideRecord::from_terms(id, terms);
                self.metrics.increment_unchanged();
                log_event_with_fields(
                    Event::TripUnchanged,
                    &[
                        ("ride_id", &id.to_string()),
                        ("duration", &terms.duration.to_string()),
                        ("requested_duration", &new_duration.to_string()),
                    ],
                );
                UpdateOutcome::Unchanged(record)
            }
        }
    }

    /// Look up one ride
    pub fn get(&self, id: RideId) -> Option<RideRecord> {
        self.metrics.increment_point_queries();
        self.attributes
            .get(&id)
            .map(|terms| RideRecord::from_terms(id, *terms))
    }

    /// All rides with `lo <= id <= hi`, ascending by id
    pub fn range(&self, lo: RideId, hi: RideId) -> Vec<RideRecord> {
        self.metrics.increment_range_queries();
        self.by_id
            .range(lo, hi)
            .into_iter()
            .filter_map(|id| {
                self.attributes
                    .get(&id)
                    .map(|terms| RideRecord::from_terms(id, *terms))
            })
            .collect()
    }

    /// Check both indexes and their agreement with the attribute table.
    pub fn verify(&self) -> IndexResult<()> {
        self.by_id.verify()?;
        self.by_priority.verify()?;

        if self.by_id.len() != self.attributes.len() {
            return Err(IndexError::diverged(format!(
                "ordered index holds {} rides, attribute table {}",
                self.by_id.len(),
                self.attributes.len()
            )));
        }
        if self.by_priority.len() != self.attributes.len() {
            return Err(IndexError::diverged(format!(
                "priority index holds {} rides, attribute table {}",
                self.by_priority.len(),
                self.attributes.len()
            )));
        }

        for (&id, terms) in &self.attributes {
            if !self.by_id.contains(id) {
                return Err(IndexError::divergence(id, "missing from ordered index"));
            }
            let queued = self
                .by_priority
                .position(id)
                .map(|slot| self.by_priority.records()[slot]);
            match queued {
                Some(record) if record.terms() == *terms => {}
                Some(record) => {
                    return Err(IndexError::divergence(
                        id,
                        format!("priority index holds stale terms {}", record),
                    ))
                }
                None => return Err(IndexError::divergence(id, "missing from priority index")),
            }
        }
        Ok(())
    }

    /// Remove `id` from all three structures.
    fn detach(&mut self, id: RideId) -> Option<RideRecord> {
        let terms = self.attributes.remove(&id)?;
        self.by_id.remove(id);
        self.by_priority.remove(id);
        self.sync_active_gauge();
        Some(RideRecord::from_terms(id, terms))
    }

    /// Swap in new terms for an active ride. The id keeps its tree node.
    fn replace_terms(&mut self, id: RideId, terms: RideTerms) -> RideRecord {
        let record = RideRecord::from_terms(id, terms);
        self.by_priority.remove(id);
        self.by_priority.insert(record);
        self.attributes.insert(id, terms);
        record
    }

    fn sync_active_gauge(&self) {
        self.metrics.set_active(self.attributes.len() as u64);
    }
}

/// Log a per-ride event, skipping the formatting when it would be dropped.
fn trace_ride(event: Event, record: &RideRecord) {
    if !Logger::enabled(event.severity()) {
        return;
    }
    log_event_with_fields(
        event,
        &[
            ("ride_id", &record.id().to_string()),
            ("cost", &record.cost().to_string()),
            ("duration", &record.duration().to_string()),
        ],
    );
}
