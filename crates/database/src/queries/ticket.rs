use model::{PurchaseRecord, Ticket, TicketId, TripId};
use sqlx::{Executor, Postgres};
use store::db::Result;
use utility::key::TraitsKey;

use crate::data_model::{purchase::PurchaseRow, ticket::TicketRow};

use super::convert_error;

pub async fn insert<'c, E>(executor: E, ticket: Ticket) -> Result<TicketId>
where
    E: Executor<'c, Database = Postgres>,
{
    let row: TicketRow = sqlx::query_as(
        "INSERT INTO tickets (user_id, trip_id, booking_time, reserved_seat)
         VALUES (
            (SELECT user_id FROM users WHERE email = $1),
            $2, $3, $4
         )
         RETURNING ticket_id, user_id, trip_id, booking_time, reserved_seat, price;",
    )
    .bind(&ticket.user_email)
    .bind(ticket.trip_id.raw())
    .bind(ticket.booking_time)
    .bind(ticket.reserved_seat)
    .fetch_one(executor)
    .await
    .map_err(convert_error)?;
    Ok(row.id())
}

pub async fn purchase_history<'c, E>(
    executor: E,
    email: &str,
) -> Result<Vec<PurchaseRecord>>
where
    E: Executor<'c, Database = Postgres>,
{
    let rows: Vec<PurchaseRow> = sqlx::query_as(
        "SELECT purchase_time, ticket_id, user_email, starting_station_name,
                ending_station_name, start_time, end_time, connection_price,
                reserved_seat
         FROM purchase
         WHERE user_email = $1
         ORDER BY purchase_time DESC;",
    )
    .bind(email)
    .fetch_all(executor)
    .await
    .map_err(convert_error)?;
    Ok(rows.into_iter().map(PurchaseRow::to_model).collect())
}

pub async fn train_capacity_for_trip<'c, E>(
    executor: E,
    trip_id: TripId,
) -> Result<Option<(TraitsKey, u32)>>
where
    E: Executor<'c, Database = Postgres>,
{
    let row: Option<(String, i32)> = sqlx::query_as(
        "SELECT t.train_name, t.capacity
         FROM trips tr
         JOIN trains t ON tr.train_id = t.train_id
         WHERE tr.trip_id = $1;",
    )
    .bind(trip_id.raw())
    .fetch_optional(executor)
    .await
    .map_err(convert_error)?;
    Ok(row.map(|(name, capacity)| (TraitsKey::new(name), capacity as u32)))
}
