use std::{error, fmt, future::Future, result};

use async_trait::async_trait;
use model::{
    PurchaseRecord, Reservation, ReservationId, ScheduleWindow, Segment, Station,
    Ticket, TicketId, Train, TripId, TripLeg, User,
};
use utility::key::TraitsKey;

#[derive(Debug)]
pub enum DatabaseError {
    /// The row the caller asked for does not exist.
    NotFound,
    /// A unique constraint was violated (station/train/user/segment already
    /// exists).
    AlreadyExists,
    /// Row lock could not be acquired without risking a lost update; the
    /// caller should surface this as `traits::TraitsError::Conflict` and
    /// may retry.
    SerializationFailure,
    /// A `CHECK` constraint was violated (a malformed email slipping past
    /// the application-level validator, for instance).
    CheckViolation,
    Other(Box<dyn error::Error + Send + Sync>),
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "row not found"),
            Self::AlreadyExists => write!(f, "row already exists"),
            Self::SerializationFailure => write!(f, "could not serialize access"),
            Self::CheckViolation => write!(f, "row violates a check constraint"),
            Self::Other(why) => write!(f, "database error: {why}"),
        }
    }
}

impl error::Error for DatabaseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Other(why) => Some(why.as_ref()),
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, DatabaseError>;

#[async_trait]
pub trait StationRepo {
    async fn exists(&mut self, name: &TraitsKey) -> Result<bool>;
    async fn get(&mut self, name: &TraitsKey) -> Result<Option<Station>>;
    async fn insert(&mut self, station: Station) -> Result<()>;
}

#[async_trait]
pub trait SegmentRepo {
    async fn travel_time(
        &mut self,
        from: &TraitsKey,
        to: &TraitsKey,
    ) -> Result<Option<u32>>;
    /// Inserts one directed row. `connect_train_stations` calls this twice
    /// (A→B and B→A) to realise an undirected segment.
    async fn insert(&mut self, segment: Segment) -> Result<()>;
}

#[async_trait]
pub trait TrainRepo {
    async fn exists(&mut self, name: &TraitsKey) -> Result<bool>;
    async fn get(&mut self, name: &TraitsKey) -> Result<Option<Train>>;
    async fn insert(&mut self, train: Train) -> Result<()>;
    async fn update_capacity(&mut self, name: &TraitsKey, capacity: u32) -> Result<()>;
    async fn update_status(
        &mut self,
        name: &TraitsKey,
        status: model::TrainStatus,
    ) -> Result<()>;
    async fn delete(&mut self, name: &TraitsKey) -> Result<()>;
}

#[async_trait]
pub trait ScheduleRepo {
    #[allow(clippy::too_many_arguments)]
    async fn insert(
        &mut self,
        train: &TraitsKey,
        starting_station: &TraitsKey,
        ending_station: &TraitsKey,
        window: ScheduleWindow,
    ) -> Result<()>;
    /// All schedules ever added for `train`, used by the invariant checker
    /// to test overlap (invariant 6) and the cross-day gap (invariant 7)
    /// against schedules that already exist.
    async fn schedules_for_train(
        &mut self,
        train: &TraitsKey,
    ) -> Result<Vec<ScheduleWindow>>;
}

#[async_trait]
pub trait TripRepo {
    /// Bulk-inserts the materialised legs for one schedule on one date,
    /// returning the assigned trip ids in the same order.
    async fn insert_many(&mut self, legs: &[TripLeg]) -> Result<Vec<TripId>>;
    async fn get(&mut self, trip_id: TripId) -> Result<TripLeg>;
    /// Returned in the same order as `trip_ids`, regardless of what
    /// order the storage backend happens to return rows in.
    async fn get_many(&mut self, trip_ids: &[TripId]) -> Result<Vec<TripLeg>>;
}

#[async_trait]
pub trait UserRepo {
    async fn exists(&mut self, email: &str) -> Result<bool>;
    async fn get(&mut self, email: &str) -> Result<Option<User>>;
    async fn insert(&mut self, user: User) -> Result<()>;
    async fn delete(&mut self, email: &str) -> Result<()>;
}

#[async_trait]
pub trait TicketRepo {
    async fn insert(&mut self, ticket: Ticket) -> Result<TicketId>;
    async fn purchase_history(&mut self, email: &str) -> Result<Vec<PurchaseRecord>>;
    async fn train_capacity_for_trip(
        &mut self,
        trip_id: TripId,
    ) -> Result<Option<(TraitsKey, u32)>>;
}

#[async_trait]
pub trait ReservationRepo {
    /// Counts existing reservations for `trip_id` under a row lock
    /// (`SELECT ... FOR UPDATE` in the Postgres implementation) so two
    /// concurrent bookings cannot both observe capacity as free.
    async fn count_for_update(&mut self, trip_id: TripId) -> Result<u32>;
    async fn insert(&mut self, reservation: Reservation) -> Result<ReservationId>;
}

/// All repos a single database handle (an autocommit connection or an
/// open transaction) exposes.
pub trait DatabaseOperations:
    StationRepo
    + SegmentRepo
    + TrainRepo
    + ScheduleRepo
    + TripRepo
    + UserRepo
    + TicketRepo
    + ReservationRepo
    + Send
{
}

#[async_trait]
pub trait DatabaseTransaction: DatabaseOperations {
    async fn commit(self) -> Result<()>;
}

pub trait DatabaseAutocommit: DatabaseOperations {}

#[async_trait]
pub trait Database: Send + Sync {
    type Transaction: DatabaseTransaction;
    type Autocommit: DatabaseAutocommit;

    fn auto(&self) -> Self::Autocommit;

    async fn transaction(&self) -> Result<Self::Transaction>;

    /// Runs `action` inside a fresh transaction, committing on success and
    /// leaving the transaction to drop (and roll back) on error.
    ///
    /// Generic over the action's error type `E` rather than fixed to
    /// `DatabaseError`, so callers can run application-level checks (an
    /// admissibility check, an authority check) inside the same
    /// transaction as the repo calls they guard, and fail with their own
    /// error type throughout — `DatabaseError`s raised by `?` inside
    /// `action` convert via `E: From<DatabaseError>`.
    async fn perform_transaction<T, E, F, Fut>(&self, action: F) -> result::Result<T, E>
    where
        T: Send,
        E: From<DatabaseError> + Send,
        F: Send + FnOnce(&mut Self::Transaction) -> Fut + Send,
        Fut: Future<Output = result::Result<T, E>> + Send;
}
