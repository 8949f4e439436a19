use model::Station;
use sqlx::FromRow;
use utility::key::TraitsKey;

#[derive(Debug, Clone, FromRow)]
pub struct StationRow {
    pub station_id: i64,
    pub name: String,
}

impl StationRow {
    pub fn to_model(self) -> Station {
        Station {
            name: TraitsKey::new(self.name),
            details: None,
        }
    }
}
