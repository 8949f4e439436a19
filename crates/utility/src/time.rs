use chrono::{NaiveDateTime, NaiveTime};

/// Adds `minutes` wall-clock minutes to `time`, wrapping across midnight.
///
/// Returns the resulting time together with the number of days the
/// addition crossed (0 if it stayed within the same day, 1 if it wrapped
/// past midnight once). Schedule validation never expects more than one
/// wrap in a single `add_minutes` call — a schedule leg longer than 24h
/// would already have failed invariant 5 before this is reached.
pub fn add_minutes(time: NaiveTime, minutes: u32) -> (NaiveTime, u32) {
    let start_of_day_minutes = time.hour_minute_of_day();
    let total = start_of_day_minutes + i64::from(minutes);
    let days = total.div_euclid(24 * 60);
    let remainder = total.rem_euclid(24 * 60);
    let new_time = NaiveTime::from_hms_opt(
        (remainder / 60) as u32,
        (remainder % 60) as u32,
        0,
    )
    .expect("remainder is always within 0..24h");
    (new_time, days as u32)
}

trait HourMinuteOfDay {
    fn hour_minute_of_day(&self) -> i64;
}

impl HourMinuteOfDay for NaiveTime {
    fn hour_minute_of_day(&self) -> i64 {
        use chrono::Timelike;
        i64::from(self.hour()) * 60 + i64::from(self.minute())
    }
}

/// Whole minutes between two timestamps (`to - from`), possibly negative.
pub fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_minutes()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    #[test]
    fn add_minutes_stays_within_day() {
        let start = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let (end, days) = add_minutes(start, 65);
        assert_eq!(end, NaiveTime::from_hms_opt(9, 5, 0).unwrap());
        assert_eq!(days, 0);
    }

    #[test]
    fn add_minutes_crosses_midnight() {
        let start = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
        let (end, days) = add_minutes(start, 45);
        assert_eq!(end, NaiveTime::from_hms_opt(0, 15, 0).unwrap());
        assert_eq!(days, 1);
    }

    #[test]
    fn minutes_between_computes_signed_difference() {
        use chrono::NaiveDate;

        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let from = day.and_hms_opt(8, 0, 0).unwrap();
        let to = day.and_hms_opt(8, 45, 0).unwrap();
        assert_eq!(minutes_between(from, to), 45);
        assert_eq!(minutes_between(to, from), -45);
    }
}
