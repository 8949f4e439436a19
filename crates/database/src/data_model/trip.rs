use chrono::{NaiveDate, NaiveTime};
use model::{TripId, TripLeg};
use sqlx::FromRow;
use utility::key::TraitsKey;

#[derive(Debug, Clone, FromRow)]
pub struct TripRow {
    pub trip_id: i64,
    pub train_name: String,
    pub starting_station: String,
    pub ending_station: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl TripRow {
    pub fn to_model(self) -> TripLeg {
        TripLeg {
            train: TraitsKey::new(self.train_name),
            from_station: TraitsKey::new(self.starting_station),
            to_station: TraitsKey::new(self.ending_station),
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    pub fn id(&self) -> TripId {
        TripId::new(self.trip_id)
    }
}
