use chrono::{NaiveDateTime, NaiveTime};
use model::PurchaseRecord;
use sqlx::FromRow;

/// Row shape of the `purchase` view, queried directly by
/// `get_purchase_history` without an intermediate id-based lookup.
#[derive(Debug, Clone, FromRow)]
pub struct PurchaseRow {
    pub purchase_time: NaiveDateTime,
    pub ticket_id: i64,
    pub user_email: String,
    pub starting_station_name: String,
    pub ending_station_name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub connection_price: i64,
    pub reserved_seat: bool,
}

impl PurchaseRow {
    pub fn to_model(self) -> PurchaseRecord {
        PurchaseRecord {
            purchase_time: self.purchase_time,
            ticket_id: self.ticket_id,
            user_email: self.user_email,
            starting_station_name: self.starting_station_name,
            ending_station_name: self.ending_station_name,
            start_time: self.start_time,
            end_time: self.end_time,
            connection_price: self.connection_price,
            reserved_seat: self.reserved_seat,
        }
    }
}
