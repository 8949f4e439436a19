use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::ticket::TicketId;

pub type ReservationId = utility::id::Id<Reservation>;

/// A capacity-consuming hold attached to a ticket. At most
/// `train.capacity` reservations may exist for a given trip leg at any
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub ticket_id: TicketId,
}

impl HasId for Reservation {
    type IdType = i64;
}
