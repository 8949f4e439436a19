use model::Segment;
use sqlx::FromRow;
use utility::key::TraitsKey;

#[derive(Debug, Clone, FromRow)]
pub struct ConnectionRow {
    pub connection_id: i64,
    pub starting_station: String,
    pub ending_station: String,
    pub travel_time: i32,
}

impl ConnectionRow {
    pub fn to_model(self) -> Segment {
        Segment {
            from: TraitsKey::new(self.starting_station),
            to: TraitsKey::new(self.ending_station),
            travel_time_minutes: self.travel_time as u32,
        }
    }
}
