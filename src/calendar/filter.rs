//! Turn raw records into a clean weekday-only history.

use std::collections::BTreeMap;

use crate::calendar::is_business_day;
use crate::domain::{ObservationRecord, RawRecord};
use crate::error::{ForecastError, Result};
use crate::holiday::encode_indicator;

/// Keep weekday records, encode holiday flags, and sort by date.
///
/// Input order is irrelevant. Two weekday records on the same date are an
/// error: there is no safe way to pick or combine them.
pub fn filter_business_days(records: &[RawRecord]) -> Result<Vec<ObservationRecord>> {
    let mut by_date: BTreeMap<_, ObservationRecord> = BTreeMap::new();
    let mut dropped = 0usize;

    for r in records {
        if !is_business_day(r.date) {
            dropped += 1;
            continue;
        }
        let obs = ObservationRecord {
            date: r.date,
            value: r.value,
            holiday_flag: encode_indicator(r.holiday_indicator.as_deref()),
        };
        if by_date.insert(r.date, obs).is_some() {
            return Err(ForecastError::DuplicateObservation { date: r.date });
        }
    }

    tracing::debug!(kept = by_date.len(), dropped, "calendar filter applied");
    Ok(by_date.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn raw(date: NaiveDate, value: f64, flag: Option<&str>) -> RawRecord {
        RawRecord {
            date,
            value,
            holiday_indicator: flag.map(str::to_string),
        }
    }

    #[test]
    fn drops_weekends_and_sorts() {
        let records = vec![
            raw(d(2025, 7, 7), 10.0, None),
            raw(d(2025, 7, 5), 3.0, None), // Saturday
            raw(d(2025, 7, 3), 8.0, Some("No")),
            raw(d(2025, 7, 4), 0.0, Some("Yes")),
            raw(d(2025, 7, 6), 1.0, Some("Yes")), // Sunday
        ];
        let out = filter_business_days(&records).unwrap();
        let dates: Vec<_> = out.iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![d(2025, 7, 3), d(2025, 7, 4), d(2025, 7, 7)]);
        assert!(!out[0].holiday_flag);
        assert!(out[1].holiday_flag);
        assert!(!out[2].holiday_flag);
    }

    #[test]
    fn duplicate_weekday_is_rejected() {
        let records = vec![
            raw(d(2025, 7, 7), 10.0, None),
            raw(d(2025, 7, 8), 11.0, None),
            raw(d(2025, 7, 7), 12.0, None),
        ];
        let err = filter_business_days(&records).unwrap_err();
        assert_eq!(err, ForecastError::DuplicateObservation { date: d(2025, 7, 7) });
    }

    #[test]
    fn duplicate_weekend_rows_are_dropped_not_rejected() {
        let records = vec![
            raw(d(2025, 7, 5), 1.0, None),
            raw(d(2025, 7, 5), 2.0, None),
            raw(d(2025, 7, 7), 10.0, None),
        ];
        let out = filter_business_days(&records).unwrap();
        assert_eq!(out.len(), 1);
    }
}
