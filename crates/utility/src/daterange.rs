use chrono::NaiveDate;

/// Enumerates every date in `[from, until]`, inclusive on both ends.
/// Done in application code rather than a recursive CTE against the
/// database: it avoids a query per schedule insertion and is simple
/// enough not to need one.
pub fn inclusive_range(from: NaiveDate, until: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut cursor = from;
    while cursor <= until {
        dates.push(cursor);
        cursor = match cursor.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_inclusive_range() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let until = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let dates = inclusive_range(from, until);
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            ]
        );
    }

    #[test]
    fn single_day_range() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(inclusive_range(day, day), vec![day]);
    }
}
