//! Turns an admissible schedule into the rows the rest of the system
//! actually queries against: one `Schedule` row, and one `Trip` row (plus
//! one graph `TRIP` edge) per adjacent stop pair per date in the
//! schedule's validity window.

use chrono::NaiveDateTime;
use model::{TripId, TripLeg};
use store::{ScheduleRepo, TripRepo};
use utility::{daterange, key::TraitsKey};

use crate::{error::Result, invariant::AdmissibleSchedule};

/// Writes the schedule row and every materialised trip for it.
///
/// The relational rows are written on `ops` and are expected to commit
/// (or roll back) as part of the caller's transaction. The graph edges
/// are written separately, after the caller has committed, since
/// `graphstore::GraphStore` lives outside the database and isn't part of
/// that transaction: a crash between the two leaves trip rows without
/// graph edges, which `search_connections` treats as simply unreachable
/// rather than corrupt.
pub async fn materialise<D>(
    ops: &mut D,
    train: &TraitsKey,
    starting_station: &TraitsKey,
    ending_station: &TraitsKey,
    admissible: &AdmissibleSchedule,
) -> Result<(Vec<TripId>, Vec<TripLeg>)>
where
    D: ScheduleRepo + TripRepo,
{
    ScheduleRepo::insert(
        ops,
        train,
        starting_station,
        ending_station,
        admissible.window,
    )
    .await?;

    let mut legs = Vec::new();
    for date in daterange::inclusive_range(
        admissible.window.valid_from,
        admissible.window.valid_until,
    ) {
        for leg in &admissible.legs {
            legs.push(TripLeg {
                train: train.clone(),
                from_station: leg.from.clone(),
                to_station: leg.to.clone(),
                date,
                start_time: leg.start,
                end_time: leg.end,
            });
        }
    }

    let trip_ids = TripRepo::insert_many(ops, &legs).await?;
    debug_assert_eq!(trip_ids.len(), legs.len());

    Ok((trip_ids, legs))
}

/// Writes one graph `TRIP` edge per materialised leg. Called after the
/// relational transaction that `materialise` wrote into has committed.
pub fn write_graph_edges(
    graph: &mut graphstore::GraphStore,
    train: &TraitsKey,
    legs: &[TripLeg],
    trip_ids: &[TripId],
) {
    let mut session = graph.session_mut();
    for (leg, trip_id) in legs.iter().zip(trip_ids) {
        let departure_time = NaiveDateTime::new(leg.date, leg.start_time);
        let arrival_time = NaiveDateTime::new(leg.date, leg.end_time);
        let travel_time_minutes = (arrival_time - departure_time).num_minutes().max(0) as u32;

        let result = session.create_trip_edge(
            &leg.from_station,
            &leg.to_station,
            graphstore::TripEdge {
                trip_id: *trip_id,
                train_name: train.clone(),
                departure_time,
                arrival_time,
                travel_time_minutes,
            },
        );
        if let Err(why) = result {
            log::error!(
                "failed to write graph edge for trip {trip_id} on train {train}: {why}"
            );
        }
    }
}
