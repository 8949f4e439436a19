//! Validates station existence, adjacency, capacity windows, the
//! terminus waiting-time floor, intra-day completion, overlap against
//! existing schedules of the same train, and the 6-hour cross-day gap,
//! in a fixed order so the first violation encountered is the one
//! reported.

use chrono::NaiveTime;
use model::{ScheduleStop, ScheduleWindow, Segment};
use store::{ScheduleRepo, SegmentRepo, StationRepo, TrainRepo};
use utility::key::TraitsKey;

use crate::error::{Result, TraitsError};

const MINUTES_PER_DAY: i64 = 24 * 60;
const TERMINUS_WAITING_FLOOR_MINUTES: u32 = 10;
const CROSS_DAY_GAP_FLOOR_MINUTES: i64 = 6 * 60;

/// Namespace for the admissibility checks, mirroring the helper type the
/// booking and scheduling flows are split against: `Traits` wires up
/// sessions and storage, `TraitsUtility` holds the checks that don't need
/// either.
pub struct TraitsUtility;

impl TraitsUtility {
    pub fn check_segment_bounds(minutes: u32) -> Result<()> {
        if !Segment::is_valid_travel_time(minutes) {
            return Err(TraitsError::invalid(format!(
                "travel time {minutes} minutes is out of bounds [1,60]"
            )));
        }
        Ok(())
    }

    pub async fn check_station_pair<D>(ops: &mut D, start: &TraitsKey, end: &TraitsKey) -> Result<()>
    where
        D: StationRepo,
    {
        if start == end {
            return Err(TraitsError::invalid("start and end station must differ"));
        }
        if !StationRepo::exists(ops, start).await? {
            return Err(TraitsError::NotFound);
        }
        if !StationRepo::exists(ops, end).await? {
            return Err(TraitsError::NotFound);
        }
        Ok(())
    }

    pub async fn check_schedule_admissible<D>(
        ops: &mut D,
        train: &TraitsKey,
        start_hour: u8,
        start_minute: u8,
        stops: &[ScheduleStop],
        valid_from: chrono::NaiveDate,
        valid_until: chrono::NaiveDate,
    ) -> Result<AdmissibleSchedule>
    where
        D: StationRepo + SegmentRepo + TrainRepo + ScheduleRepo,
    {
        check_schedule_admissible_impl(
            ops,
            train,
            start_hour,
            start_minute,
            stops,
            valid_from,
            valid_until,
        )
        .await
    }
}

/// Timing of one materialised leg within an admitted schedule, before
/// being stamped with a calendar date.
#[derive(Debug, Clone)]
pub struct LegTiming {
    pub from: TraitsKey,
    pub to: TraitsKey,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// An admissible schedule together with the per-leg timing the
/// Materialiser needs so it does not have to recompute it.
#[derive(Debug, Clone)]
pub struct AdmissibleSchedule {
    pub window: ScheduleWindow,
    pub legs: Vec<LegTiming>,
}

async fn check_schedule_admissible_impl<D>(
    ops: &mut D,
    train: &TraitsKey,
    start_hour: u8,
    start_minute: u8,
    stops: &[ScheduleStop],
    valid_from: chrono::NaiveDate,
    valid_until: chrono::NaiveDate,
) -> Result<AdmissibleSchedule>
where
    D: StationRepo + SegmentRepo + TrainRepo + ScheduleRepo,
{
    // 1. train exists
    if !TrainRepo::exists(ops, train).await? {
        return Err(TraitsError::invalid(format!(
            "train {train} does not exist"
        )));
    }

    // 2. start time bounds
    if start_hour > 23 {
        return Err(TraitsError::invalid("start hour must be in 0..=23"));
    }
    if start_minute > 59 {
        return Err(TraitsError::invalid("start minute must be in 0..=59"));
    }

    // 3. at least two stops, all stations exist
    if stops.len() < 2 {
        return Err(TraitsError::invalid("a schedule needs at least two stops"));
    }
    for stop in stops {
        if !StationRepo::exists(ops, &stop.station).await? {
            return Err(TraitsError::invalid(format!(
                "station {} does not exist",
                stop.station
            )));
        }
    }

    // 4. consecutive pairs are directed segments; travel_time is looked
    //    up, not supplied. Accumulated in raw minutes-since-midnight so a
    //    wrap past midnight is just a value >= MINUTES_PER_DAY rather
    //    than a wrapped NaiveTime.
    let mut cursor = i64::from(start_hour) * 60 + i64::from(start_minute);
    let mut raw_legs = Vec::with_capacity(stops.len() - 1);
    for (index, pair) in stops.windows(2).enumerate() {
        let from = &pair[0].station;
        let to = &pair[1].station;
        let travel_time = SegmentRepo::travel_time(ops, from, to)
            .await?
            .ok_or_else(|| {
                TraitsError::invalid(format!("{from} and {to} are not connected"))
            })?;

        let leg_start = cursor;
        let leg_end = leg_start + i64::from(travel_time);
        raw_legs.push((from.clone(), to.clone(), leg_start, leg_end));

        // waiting_minutes of the arriving stop is the dwell before the
        // next departure; on the final pair it is dead (there is no
        // next leg) but its value is still validated as the terminus
        // floor below.
        let is_last_pair = index == stops.len() - 2;
        cursor = if is_last_pair {
            leg_end
        } else {
            leg_end + i64::from(pair[1].waiting_minutes)
        };
    }

    // 5. terminus dwell floor
    let terminus_waiting = stops.last().expect("len checked above").waiting_minutes;
    if terminus_waiting < TERMINUS_WAITING_FLOOR_MINUTES {
        return Err(TraitsError::invalid(format!(
            "terminus waiting time {terminus_waiting} is below the \
             {TERMINUS_WAITING_FLOOR_MINUTES}-minute floor"
        )));
    }

    // 6. computed end_time does not cross midnight
    let end_time_minutes = raw_legs.last().expect("at least one leg").3;
    if end_time_minutes >= MINUTES_PER_DAY {
        return Err(TraitsError::invalid(
            "schedule crosses midnight before reaching its terminus",
        ));
    }

    let to_naive_time = |minutes: i64| {
        NaiveTime::from_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0)
            .expect("bounds checked above")
    };
    let window = ScheduleWindow {
        start_time: to_naive_time(raw_legs[0].2),
        end_time: to_naive_time(end_time_minutes),
        valid_from,
        valid_until,
    };
    let legs: Vec<LegTiming> = raw_legs
        .iter()
        .map(|(from, to, start, end)| LegTiming {
            from: from.clone(),
            to: to.clone(),
            start: to_naive_time(*start),
            end: to_naive_time(*end),
        })
        .collect();

    // 7. no overlap with any existing schedule of the same train whose
    //    validity window intersects [valid_from, valid_until]
    // 8. 6-hour cross-day gap against the immediately preceding day's
    //    last schedule and the immediately following day's first
    //    schedule for the same train
    let existing = ScheduleRepo::schedules_for_train(ops, train).await?;
    check_no_overlap(&window, &existing)?;
    check_cross_day_gap(&window, &existing)?;

    Ok(AdmissibleSchedule { window, legs })
}

fn check_no_overlap(window: &ScheduleWindow, existing: &[ScheduleWindow]) -> Result<()> {
    for other in existing {
        let ranges_intersect = window.valid_from <= other.valid_until
            && other.valid_from <= window.valid_until;
        if !ranges_intersect {
            continue;
        }
        let times_overlap =
            window.start_time <= other.end_time && window.end_time >= other.start_time;
        if times_overlap {
            return Err(TraitsError::invalid(
                "schedule overlaps an existing schedule of the same train",
            ));
        }
    }
    Ok(())
}

fn check_cross_day_gap(window: &ScheduleWindow, existing: &[ScheduleWindow]) -> Result<()> {
    if let Some(previous_day) = window.valid_from.pred_opt() {
        let last_on_previous_day = existing
            .iter()
            .filter(|other| {
                other.valid_from <= previous_day && previous_day <= other.valid_until
            })
            .max_by_key(|other| other.end_time);
        if let Some(last) = last_on_previous_day {
            let gap = minutes_until_midnight(last.end_time)
                + minutes_since_midnight(window.start_time);
            if gap < CROSS_DAY_GAP_FLOOR_MINUTES {
                return Err(TraitsError::invalid(
                    "less than 6 hours since the previous day's schedule ended",
                ));
            }
        }
    }

    if let Some(next_day) = window.valid_until.succ_opt() {
        let first_on_next_day = existing
            .iter()
            .filter(|other| other.valid_from <= next_day && next_day <= other.valid_until)
            .min_by_key(|other| other.start_time);
        if let Some(first) = first_on_next_day {
            let gap = minutes_until_midnight(window.end_time)
                + minutes_since_midnight(first.start_time);
            if gap < CROSS_DAY_GAP_FLOOR_MINUTES {
                return Err(TraitsError::invalid(
                    "less than 6 hours before the next day's schedule starts",
                ));
            }
        }
    }

    Ok(())
}

fn minutes_since_midnight(time: NaiveTime) -> i64 {
    use chrono::Timelike;
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

fn minutes_until_midnight(time: NaiveTime) -> i64 {
    MINUTES_PER_DAY - minutes_since_midnight(time)
}
