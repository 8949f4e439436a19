use model::ScheduleWindow;
use sqlx::{Executor, Postgres};
use store::db::Result;
use utility::key::TraitsKey;

use crate::data_model::schedule::ScheduleRow;

use super::convert_error;

pub async fn insert<'c, E>(
    executor: E,
    train: &TraitsKey,
    starting_station: &TraitsKey,
    ending_station: &TraitsKey,
    window: ScheduleWindow,
) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query(
        "INSERT INTO schedules (
            train_id, starting_station_id, ending_station_id,
            start_time, end_time, valid_from, valid_until
         )
         VALUES (
            (SELECT train_id FROM trains WHERE train_name = $1),
            (SELECT station_id FROM stations WHERE name = $2),
            (SELECT station_id FROM stations WHERE name = $3),
            $4, $5, $6, $7
         );",
    )
    .bind(train.as_str())
    .bind(starting_station.as_str())
    .bind(ending_station.as_str())
    .bind(window.start_time)
    .bind(window.end_time)
    .bind(window.valid_from)
    .bind(window.valid_until)
    .execute(executor)
    .await
    .map_err(convert_error)?;
    Ok(())
}

pub async fn schedules_for_train<'c, E>(
    executor: E,
    train: &TraitsKey,
) -> Result<Vec<ScheduleWindow>>
where
    E: Executor<'c, Database = Postgres>,
{
    let rows: Vec<ScheduleRow> = sqlx::query_as(
        "SELECT s.schedule_id, s.train_id, s.starting_station_id, s.ending_station_id,
                s.start_time, s.end_time, s.valid_from, s.valid_until
         FROM schedules s
         JOIN trains t ON s.train_id = t.train_id
         WHERE t.train_name = $1;",
    )
    .bind(train.as_str())
    .fetch_all(executor)
    .await
    .map_err(convert_error)?;
    Ok(rows.iter().map(ScheduleRow::to_window).collect())
}
