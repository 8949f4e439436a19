use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utility::{
    id::HasId,
    key::TraitsKey,
};

pub type TripId = utility::id::Id<TripLeg>;

/// One materialised leg on one date: the unit that can be ticketed and
/// reserved. Produced by the Schedule Materialiser, one row per
/// adjacent stop pair per date in a schedule's validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripLeg {
    pub train: TraitsKey,
    pub from_station: TraitsKey,
    pub to_station: TraitsKey,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl HasId for TripLeg {
    type IdType = i64;
}
