use model::User;
use sqlx::{Executor, Postgres};
use store::db::Result;

use crate::data_model::user::UserRow;

use super::convert_error;

pub async fn exists<'c, E>(executor: E, email: &str) -> Result<bool>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1);")
        .bind(email)
        .fetch_one(executor)
        .await
        .map_err(convert_error)
}

pub async fn get<'c, E>(executor: E, email: &str) -> Result<Option<User>>
where
    E: Executor<'c, Database = Postgres>,
{
    let row: Option<UserRow> =
        sqlx::query_as("SELECT user_id, email, details FROM users WHERE email = $1;")
            .bind(email)
            .fetch_optional(executor)
            .await
            .map_err(convert_error)?;
    Ok(row.map(UserRow::to_model))
}

pub async fn insert<'c, E>(executor: E, user: User) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query("INSERT INTO users (email, details) VALUES ($1, $2);")
        .bind(user.email)
        .bind(user.details)
        .execute(executor)
        .await
        .map_err(convert_error)?;
    Ok(())
}

pub async fn delete<'c, E>(executor: E, email: &str) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM users WHERE email = $1;")
        .bind(email)
        .execute(executor)
        .await
        .map_err(convert_error)?;
    if result.rows_affected() == 0 {
        return Err(store::db::DatabaseError::NotFound);
    }
    Ok(())
}
