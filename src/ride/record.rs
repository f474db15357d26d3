//! RideRecord and its priority key

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique ride identifier, also the ordering key for range queries.
pub type RideId = u64;

/// Dispatch priority: cost first, then duration, both ascending.
pub type Priority = (u64, u64);

/// The mutable-by-replacement terms of a ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RideTerms {
    /// Fare charged for the ride
    pub cost: u64,
    /// Trip duration
    pub duration: u64,
}

impl RideTerms {
    /// Create ride terms
    pub fn new(cost: u64, duration: u64) -> Self {
        Self { cost, duration }
    }

    /// Priority key for these terms
    pub fn priority(&self) -> Priority {
        (self.cost, self.duration)
    }
}

/// A single ride request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RideRecord {
    id: RideId,
    cost: u64,
    duration: u64,
}

impl RideRecord {
    /// Create a new ride record
    pub fn new(id: RideId, cost: u64, duration: u64) -> Self {
        Self { id, cost, duration }
    }

    /// Build a record from an id and its terms
    pub fn from_terms(id: RideId, terms: RideTerms) -> Self {
        Self::new(id, terms.cost, terms.duration)
    }

    /// Ride id
    pub fn id(&self) -> RideId {
        self.id
    }

    /// Ride cost
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Trip duration
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Cost and duration without the id
    pub fn terms(&self) -> RideTerms {
        RideTerms::new(self.cost, self.duration)
    }

    /// Lexicographic (cost, duration) key used by the dispatch queue
    pub fn priority(&self) -> Priority {
        (self.cost, self.duration)
    }
}

/// Renders as `(id,cost,duration)`.
impl fmt::Display for RideRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.id, self.cost, self.duration)
    }
}
