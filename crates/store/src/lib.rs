//! Storage-agnostic traits for the relational side of Traits.
//!
//! Nothing in this crate knows about `sqlx` or Postgres; `database`
//! provides the only implementation today, but keeping the trait
//! boundary here is what lets `traits`'s invariant checker,
//! materialiser, search engine and booking engine be exercised in tests
//! against an in-memory fake.

pub mod db;

pub use db::{
    Database, DatabaseAutocommit, DatabaseError, DatabaseOperations,
    DatabaseTransaction, ReservationRepo, ScheduleRepo, SegmentRepo, StationRepo,
    TicketRepo, TrainRepo, TripRepo, UserRepo,
};
