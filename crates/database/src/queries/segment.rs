use model::Segment;
use sqlx::{Executor, Postgres};
use store::db::Result;
use utility::key::TraitsKey;

use super::convert_error;

pub async fn travel_time<'c, E>(
    executor: E,
    from: &TraitsKey,
    to: &TraitsKey,
) -> Result<Option<u32>>
where
    E: Executor<'c, Database = Postgres>,
{
    let minutes: Option<i32> = sqlx::query_scalar(
        "SELECT travel_time FROM connections
         WHERE starting_station = $1 AND ending_station = $2;",
    )
    .bind(from.as_str())
    .bind(to.as_str())
    .fetch_optional(executor)
    .await
    .map_err(convert_error)?;
    Ok(minutes.map(|minutes| minutes as u32))
}

pub async fn insert<'c, E>(executor: E, segment: Segment) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query(
        "INSERT INTO connections (starting_station, ending_station, travel_time)
         VALUES ($1, $2, $3);",
    )
    .bind(segment.from.as_str())
    .bind(segment.to.as_str())
    .bind(segment.travel_time_minutes as i32)
    .execute(executor)
    .await
    .map_err(convert_error)?;
    Ok(())
}
