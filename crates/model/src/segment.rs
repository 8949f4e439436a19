use serde::{Deserialize, Serialize};
use utility::key::TraitsKey;

/// One directed adjacency between two stations.
///
/// A segment is always inserted as a pair of rows (A→B and B→A sharing
/// `travel_time`) so that each direction can be looked up with a single
/// directed query; `Segment` itself only ever represents one of those
/// two directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub from: TraitsKey,
    pub to: TraitsKey,
    pub travel_time_minutes: u32,
}

impl Segment {
    pub fn new(from: TraitsKey, to: TraitsKey, travel_time_minutes: u32) -> Self {
        Self {
            from,
            to,
            travel_time_minutes,
        }
    }

    /// Travel times are bounded to `1..=60` minutes.
    pub fn is_valid_travel_time(minutes: u32) -> bool {
        (1..=60).contains(&minutes)
    }
}
