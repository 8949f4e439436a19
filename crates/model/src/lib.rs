//! Domain types for the Traits train-reservation system.
//!
//! These are plain data: no database or graph-store code lives here, only
//! the domain shapes and the small amount of behaviour
//! (`Schedule::stop_pairs`, `TrainStatus` conversions, ...) that follows
//! directly from those shapes.

pub mod purchase;
pub mod reservation;
pub mod schedule;
pub mod segment;
pub mod sorting;
pub mod station;
pub mod ticket;
pub mod train;
pub mod trip;
pub mod user;

pub use purchase::PurchaseRecord;
pub use reservation::{Reservation, ReservationId};
pub use schedule::{Schedule, ScheduleStop, ScheduleWindow};
pub use segment::Segment;
pub use sorting::SortingCriteria;
pub use station::Station;
pub use ticket::{Ticket, TicketId};
pub use train::{Train, TrainStatus};
pub use trip::{TripId, TripLeg};
pub use user::User;
