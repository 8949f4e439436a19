use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utility::key::TraitsKey;

/// One (station, waiting-time) entry in a schedule's stop list.
///
/// `waiting_minutes` is the dwell time *at* this stop before the train
/// departs for the next one; for the last stop it is the terminus dwell
/// subject to the 10-minute floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStop {
    pub station: TraitsKey,
    pub waiting_minutes: u32,
}

impl ScheduleStop {
    pub fn new(station: TraitsKey, waiting_minutes: u32) -> Self {
        Self {
            station,
            waiting_minutes,
        }
    }
}

/// The recurring daily template for one train's run.
///
/// A `Schedule` is immutable once added: there is no update or delete
/// operation in the surface API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub train: TraitsKey,
    pub start_hour: u8,
    pub start_minute: u8,
    pub stops: Vec<ScheduleStop>,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
}

impl Schedule {
    /// Consecutive `(from, to)` station pairs that must each be a directed
    /// Segment.
    pub fn stop_pairs(&self) -> impl Iterator<Item = (&TraitsKey, &TraitsKey)> {
        self.stops
            .windows(2)
            .map(|pair| (&pair[0].station, &pair[1].station))
    }
}

/// The persisted shape of a schedule: just enough to check overlap and
/// the cross-day gap against schedules that already exist for a train.
/// Mirrors what the `schedules` table actually stores — the per-stop
/// waiting times are not retained once the trip legs have been
/// materialised, only the overall first-departure/last-arrival span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
}
