use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Row of the `purchase` view: a join of Ticket × Trip × Stations ×
/// User, read by `get_purchase_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
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
