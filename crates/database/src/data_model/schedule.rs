use model::ScheduleWindow;
use sqlx::FromRow;

/// One row of `schedules`. `stops` aren't normalised into their own
/// table in this schema: only the overall start/end station and time
/// are stored here, and intermediate stops are reconstructed from the
/// `trips` rows a schedule materialised.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleRow {
    pub schedule_id: i64,
    pub train_id: i64,
    pub starting_station_id: i64,
    pub ending_station_id: i64,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub valid_from: chrono::NaiveDate,
    pub valid_until: chrono::NaiveDate,
}

impl ScheduleRow {
    pub fn to_window(&self) -> ScheduleWindow {
        ScheduleWindow {
            start_time: self.start_time,
            end_time: self.end_time,
            valid_from: self.valid_from,
            valid_until: self.valid_until,
        }
    }
}
