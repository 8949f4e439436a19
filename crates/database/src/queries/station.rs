use model::Station;
use sqlx::{Executor, Postgres};
use store::db::Result;
use utility::key::TraitsKey;

use crate::data_model::station::StationRow;

use super::convert_error;

pub async fn exists<'c, E>(executor: E, name: &TraitsKey) -> Result<bool>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM stations WHERE name = $1);")
        .bind(name.as_str())
        .fetch_one(executor)
        .await
        .map_err(convert_error)
}

pub async fn get<'c, E>(executor: E, name: &TraitsKey) -> Result<Option<Station>>
where
    E: Executor<'c, Database = Postgres>,
{
    let row: Option<StationRow> =
        sqlx::query_as("SELECT station_id, name FROM stations WHERE name = $1;")
            .bind(name.as_str())
            .fetch_optional(executor)
            .await
            .map_err(convert_error)?;
    Ok(row.map(StationRow::to_model))
}

pub async fn insert<'c, E>(executor: E, station: Station) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query("INSERT INTO stations (name) VALUES ($1);")
        .bind(station.name.as_str())
        .execute(executor)
        .await
        .map_err(convert_error)?;
    Ok(())
}
