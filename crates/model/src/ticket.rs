use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::trip::TripId;

pub type TicketId = utility::id::Id<Ticket>;

/// Proof of purchase for one trip leg. `price` is filled in by the
/// Postgres `BEFORE INSERT` trigger on the `tickets` table (also
/// computed independently in `traits::booking` so in-memory test
/// doubles behave the same way) and is immutable once the ticket is
/// inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub user_email: String,
    pub trip_id: TripId,
    pub booking_time: NaiveDateTime,
    pub reserved_seat: bool,
    pub price: i64,
}

impl HasId for Ticket {
    type IdType = i64;
}
