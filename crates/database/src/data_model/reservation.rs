use model::{Reservation, ReservationId, TicketId};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ReservationRow {
    pub reservation_id: i64,
    pub ticket_id: i64,
}

impl ReservationRow {
    pub fn to_model(self) -> Reservation {
        Reservation {
            ticket_id: TicketId::new(self.ticket_id),
        }
    }

    pub fn id(&self) -> ReservationId {
        ReservationId::new(self.reservation_id)
    }
}
