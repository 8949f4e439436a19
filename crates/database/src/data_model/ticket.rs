use chrono::NaiveDateTime;
use model::{Ticket, TicketId, TripId};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TicketRow {
    pub ticket_id: i64,
    pub user_id: i64,
    pub trip_id: i64,
    pub booking_time: NaiveDateTime,
    pub reserved_seat: bool,
    pub price: i64,
}

impl TicketRow {
    pub fn to_model(self, user_email: String) -> Ticket {
        Ticket {
            user_email,
            trip_id: TripId::new(self.trip_id),
            booking_time: self.booking_time,
            reserved_seat: self.reserved_seat,
            price: self.price,
        }
    }

    pub fn id(&self) -> TicketId {
        TicketId::new(self.ticket_id)
    }
}
