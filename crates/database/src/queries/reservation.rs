use model::{Reservation, ReservationId, TripId};
use sqlx::{Executor, Postgres};
use store::db::Result;

use crate::data_model::reservation::ReservationRow;

use super::convert_error;

/// Locks every reservation row belonging to `trip_id`'s ticket so a
/// concurrent booking cannot insert past capacity before this
/// transaction commits.
pub async fn count_for_update<'c, E>(executor: E, trip_id: TripId) -> Result<u32>
where
    E: Executor<'c, Database = Postgres>,
{
    let count: i64 = sqlx::query_scalar(
        "WITH locked AS (
            SELECT r.reservation_id
            FROM reservations r
            JOIN tickets tk ON r.ticket_id = tk.ticket_id
            WHERE tk.trip_id = $1
            FOR UPDATE OF r
         )
         SELECT COUNT(*) FROM locked;",
    )
    .bind(trip_id.raw())
    .fetch_one(executor)
    .await
    .map_err(convert_error)?;
    Ok(count as u32)
}

pub async fn insert<'c, E>(
    executor: E,
    reservation: Reservation,
) -> Result<ReservationId>
where
    E: Executor<'c, Database = Postgres>,
{
    let row: ReservationRow = sqlx::query_as(
        "INSERT INTO reservations (ticket_id) VALUES ($1)
         RETURNING reservation_id, ticket_id;",
    )
    .bind(reservation.ticket_id.raw())
    .fetch_one(executor)
    .await
    .map_err(convert_error)?;
    Ok(row.id())
}
