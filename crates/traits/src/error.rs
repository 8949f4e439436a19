use std::{error, fmt};

use store::DatabaseError;

/// Four-way error taxonomy for surface operations, hand-written in the
/// style of the store crate's `DatabaseError` — no `thiserror`, no
/// `anyhow`.
#[derive(Debug)]
pub enum TraitsError {
    /// A violated precondition: missing station, duplicate, equal
    /// endpoints, out-of-range minutes, schedule-admissibility failure,
    /// malformed email, capacity exhausted, unauthorised operation with
    /// the base handle, missing user on delete.
    InvalidArgument(String),
    /// Quiet absence where semantically meaningful. Surface
    /// operations that define their own "not found" response (null
    /// status, empty history) catch this before it reaches the caller.
    NotFound,
    /// Serialization failure on booking. Retryable.
    Conflict,
    /// Any store error not anticipated above.
    Internal(Box<dyn error::Error + Send + Sync>),
}

impl TraitsError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

impl fmt::Display for TraitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::NotFound => write!(f, "not found"),
            Self::Conflict => write!(f, "conflict, retry the operation"),
            Self::Internal(why) => write!(f, "internal error: {why}"),
        }
    }
}

impl error::Error for TraitsError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Internal(why) => Some(why.as_ref()),
            _ => None,
        }
    }
}

impl From<DatabaseError> for TraitsError {
    fn from(why: DatabaseError) -> Self {
        match why {
            DatabaseError::NotFound => Self::NotFound,
            DatabaseError::AlreadyExists => {
                Self::InvalidArgument("already exists".to_string())
            }
            DatabaseError::SerializationFailure => Self::Conflict,
            DatabaseError::CheckViolation => {
                Self::InvalidArgument("violates a check constraint".to_string())
            }
            DatabaseError::Other(why) => Self::Internal(why),
        }
    }
}

pub type Result<T> = std::result::Result<T, TraitsError>;
