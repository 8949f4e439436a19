use model::{Train, TrainStatus};
use sqlx::FromRow;
use utility::key::TraitsKey;

#[derive(Debug, Clone, FromRow)]
pub struct TrainRow {
    pub train_id: i64,
    pub train_name: String,
    pub capacity: i32,
    pub status: i32,
}

impl TrainRow {
    pub fn to_model(self) -> Train {
        Train {
            name: TraitsKey::new(self.train_name),
            capacity: self.capacity as u32,
            status: TrainStatus::from_i32(self.status).unwrap_or(TrainStatus::Operational),
        }
    }
}
