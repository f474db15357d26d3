//! Result rendering

use crate::ride::{RideId, RideRecord};

/// Output when a dispatch finds nothing queued
pub const NO_ACTIVE_REQUESTS: &str = "No active ride requests";

/// Output when an insert reuses a tracked id
pub const DUPLICATE_RIDE: &str = "Duplicate RideNumber";

/// Output for a missing ride or an empty range
pub const EMPTY_RIDE: &str = "(0,0,0)";

/// What a command produced, before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `GetNextRide`: the dispatched ride, if any
    Dispatched(Option<RideRecord>),
    /// `Print(id)`: the ride, if found
    Ride(Option<RideRecord>),
    /// `Print(lo,hi)`: rides in ascending id order
    Rides(Vec<RideRecord>),
    /// `Insert` on a tracked id; the session ends
    Duplicate(RideId),
    /// Commands with no output
    Silent,
}

impl Response {
    /// The output line for this response, without a trailing newline
    pub fn render(&self) -> Option<String> {
        match self {
            Response::Dispatched(Some(record)) | Response::Ride(Some(record)) => {
                Some(record.to_string())
            }
            Response::Dispatched(None) => Some(NO_ACTIVE_REQUESTS.to_string()),
            Response::Ride(None) => Some(EMPTY_RIDE.to_string()),
            Response::Rides(records) if records.is_empty() => Some(EMPTY_RIDE.to_string()),
            Response::Rides(records) => Some(
                records
                    .iter()
                    .map(RideRecord::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Response::Duplicate(_) => Some(DUPLICATE_RIDE.to_string()),
            Response::Silent => None,
        }
    }

    /// Returns true if the session must stop after this response
    pub fn is_terminal(&self) -> bool {
        matches!(self, Response::Duplicate(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_ride() {
        let r = RideRecord::new(4, 20, 7);
        assert_eq!(Response::Ride(Some(r)).render().unwrap(), "(4,20,7)");
        assert_eq!(Response::Dispatched(Some(r)).render().unwrap(), "(4,20,7)");
    }

    #[test]
    fn test_render_missing() {
        assert_eq!(Response::Ride(None).render().unwrap(), "(0,0,0)");
        assert_eq!(Response::Rides(vec![]).render().unwrap(), "(0,0,0)");
        assert_eq!(
            Response::Dispatched(None).render().unwrap(),
            "No active ride requests"
        );
    }

    #[test]
    fn test_render_range_joined() {
        let rides = vec![RideRecord::new(3, 1, 1), RideRecord::new(7, 2, 2)];
        assert_eq!(Response::Rides(rides).render().unwrap(), "(3,1,1),(7,2,2)");
    }

    #[test]
    fn test_duplicate_is_terminal() {
        assert_eq!(Response::Duplicate(5).render().unwrap(), "Duplicate RideNumber");
        assert!(Response::Duplicate(5).is_terminal());
        assert!(!Response::Silent.is_terminal());
        assert_eq!(Response::Silent.render(), None);
    }
}
