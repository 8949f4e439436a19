use model::{TripId, TripLeg};
use sqlx::{Executor, Postgres};
use store::db::{DatabaseError, Result};

use crate::data_model::trip::TripRow;

use super::convert_error;

const TRIP_SELECT: &str = "
    SELECT
        tr.trip_id, t.train_name,
        s1.name AS starting_station, s2.name AS ending_station,
        tr.date, tr.start_time, tr.end_time
    FROM trips tr
    JOIN trains t ON tr.train_id = t.train_id
    JOIN stations s1 ON tr.starting_station_id = s1.station_id
    JOIN stations s2 ON tr.ending_station_id = s2.station_id
";

pub async fn insert_many<'c, E>(executor: E, legs: &[TripLeg]) -> Result<Vec<TripId>>
where
    E: Executor<'c, Database = Postgres>,
{
    let mut ids = Vec::with_capacity(legs.len());
    for leg in legs {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO trips (
                train_id, starting_station_id, ending_station_id,
                date, start_time, end_time
             )
             VALUES (
                (SELECT train_id FROM trains WHERE train_name = $1),
                (SELECT station_id FROM stations WHERE name = $2),
                (SELECT station_id FROM stations WHERE name = $3),
                $4, $5, $6
             )
             RETURNING trip_id;",
        )
        .bind(leg.train.as_str())
        .bind(leg.from_station.as_str())
        .bind(leg.to_station.as_str())
        .bind(leg.date)
        .bind(leg.start_time)
        .bind(leg.end_time)
        .fetch_one(executor)
        .await
        .map_err(convert_error)?;
        ids.push(TripId::new(id));
    }
    Ok(ids)
}

pub async fn get<'c, E>(executor: E, trip_id: TripId) -> Result<TripLeg>
where
    E: Executor<'c, Database = Postgres>,
{
    let row: TripRow =
        sqlx::query_as(&format!("{TRIP_SELECT} WHERE tr.trip_id = $1;"))
            .bind(trip_id.raw())
            .fetch_optional(executor)
            .await
            .map_err(convert_error)?
            .ok_or(DatabaseError::NotFound)?;
    Ok(row.to_model())
}

/// `ANY($1)` does not preserve the order of the array it is matched
/// against, so the result is re-sorted to match `trip_ids` after the
/// query returns rather than relying on row order out of Postgres.
pub async fn get_many<'c, E>(executor: E, trip_ids: &[TripId]) -> Result<Vec<TripLeg>>
where
    E: Executor<'c, Database = Postgres>,
{
    let raw_ids: Vec<i64> = trip_ids.iter().map(|id| id.raw()).collect();
    let rows: Vec<TripRow> =
        sqlx::query_as(&format!("{TRIP_SELECT} WHERE tr.trip_id = ANY($1);"))
            .bind(&raw_ids)
            .fetch_all(executor)
            .await
            .map_err(convert_error)?;

    let mut by_id: std::collections::HashMap<i64, TripRow> =
        rows.into_iter().map(|row| (row.trip_id, row)).collect();
    trip_ids
        .iter()
        .map(|id| {
            by_id
                .remove(&id.raw())
                .map(TripRow::to_model)
                .ok_or(DatabaseError::NotFound)
        })
        .collect()
}
