use store::db::DatabaseError;

pub mod reservation;
pub mod schedule;
pub mod segment;
pub mod station;
pub mod ticket;
pub mod train;
pub mod trip;
pub mod user;

/// Postgres error codes the invariant checker and booking engine care
/// about: `23505` is a unique-constraint violation (station/train/user
/// already exists), `40001` is the serialization failure raised when two
/// transactions race under `SERIALIZABLE` isolation, `23514` is a
/// `CHECK` constraint violation (a malformed email reaching the insert).
const UNIQUE_VIOLATION: &str = "23505";
const SERIALIZATION_FAILURE: &str = "40001";
const CHECK_VIOLATION: &str = "23514";

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match &why {
        sqlx::Error::RowNotFound => return DatabaseError::NotFound,
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                if code == UNIQUE_VIOLATION {
                    return DatabaseError::AlreadyExists;
                }
                if code == SERIALIZATION_FAILURE {
                    return DatabaseError::SerializationFailure;
                }
                if code == CHECK_VIOLATION {
                    return DatabaseError::CheckViolation;
                }
            }
        }
        _ => {}
    }
    DatabaseError::Other(Box::new(why))
}
