use model::{Train, TrainStatus};
use sqlx::{Executor, Postgres};
use store::db::Result;
use utility::key::TraitsKey;

use crate::data_model::train::TrainRow;

use super::convert_error;

pub async fn exists<'c, E>(executor: E, name: &TraitsKey) -> Result<bool>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM trains WHERE train_name = $1);")
        .bind(name.as_str())
        .fetch_one(executor)
        .await
        .map_err(convert_error)
}

pub async fn get<'c, E>(executor: E, name: &TraitsKey) -> Result<Option<Train>>
where
    E: Executor<'c, Database = Postgres>,
{
    let row: Option<TrainRow> = sqlx::query_as(
        "SELECT train_id, train_name, capacity, status
         FROM trains WHERE train_name = $1;",
    )
    .bind(name.as_str())
    .fetch_optional(executor)
    .await
    .map_err(convert_error)?;
    Ok(row.map(TrainRow::to_model))
}

pub async fn insert<'c, E>(executor: E, train: Train) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query("INSERT INTO trains (train_name, capacity, status) VALUES ($1, $2, $3);")
        .bind(train.name.as_str())
        .bind(train.capacity as i32)
        .bind(train.status.as_i32())
        .execute(executor)
        .await
        .map_err(convert_error)?;
    Ok(())
}

pub async fn update_capacity<'c, E>(
    executor: E,
    name: &TraitsKey,
    capacity: u32,
) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query("UPDATE trains SET capacity = $1 WHERE train_name = $2;")
        .bind(capacity as i32)
        .bind(name.as_str())
        .execute(executor)
        .await
        .map_err(convert_error)?;
    if result.rows_affected() == 0 {
        return Err(store::db::DatabaseError::NotFound);
    }
    Ok(())
}

pub async fn update_status<'c, E>(
    executor: E,
    name: &TraitsKey,
    status: TrainStatus,
) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query("UPDATE trains SET status = $1 WHERE train_name = $2;")
        .bind(status.as_i32())
        .bind(name.as_str())
        .execute(executor)
        .await
        .map_err(convert_error)?;
    if result.rows_affected() == 0 {
        return Err(store::db::DatabaseError::NotFound);
    }
    Ok(())
}

pub async fn delete<'c, E>(executor: E, name: &TraitsKey) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM trains WHERE train_name = $1;")
        .bind(name.as_str())
        .execute(executor)
        .await
        .map_err(convert_error)?;
    if result.rows_affected() == 0 {
        return Err(store::db::DatabaseError::NotFound);
    }
    Ok(())
}
