//! Build the prediction calendar: history dates plus the forward horizon.
//!
//! Flag assignment is an ordered sequence of writes, last one wins:
//!
//! 1. historical dates take their observed flag
//! 2. horizon dates default to `false`
//! 3. declared holidays force `true` on every calendar date they hit

use chrono::NaiveDate;

use crate::calendar::business_days_after;
use crate::domain::{CalendarEntry, ObservationRecord};
use crate::error::{ForecastError, Result};
use crate::holiday::KnownHolidays;

/// Prediction calendar plus bookkeeping about the declared holidays.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionCalendar {
    pub entries: Vec<CalendarEntry>,
    /// Declared holidays that landed on a calendar date.
    pub matched_holidays: Vec<NaiveDate>,
    /// Declared holidays outside the calendar (weekends, past or beyond the horizon).
    pub unmatched_holidays: Vec<NaiveDate>,
}

impl PredictionCalendar {
    pub fn future_len(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_history).count()
    }
}

/// Build the calendar for `observations` and `horizon` business days.
///
/// Observations must be date-sorted and unique, as `filter_business_days`
/// produces them. Fails if fewer than `horizon` business days exist past the
/// last observation.
pub fn build_calendar(
    observations: &[ObservationRecord],
    horizon: usize,
    known: &KnownHolidays,
) -> Result<PredictionCalendar> {
    let Some(last) = observations.last() else {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    };
    for pair in observations.windows(2) {
        if pair[0].date == pair[1].date {
            return Err(ForecastError::DuplicateObservation { date: pair[1].date });
        }
        if pair[0].date > pair[1].date {
            return Err(ForecastError::InvalidParameter(format!(
                "observations must be date-sorted: {} follows {}",
                pair[1].date, pair[0].date
            )));
        }
    }

    let future = business_days_after(last.date, horizon);
    if future.len() < horizon {
        return Err(ForecastError::InvalidParameter(format!(
            "horizon of {horizon} business days runs past the last representable date ({} available after {})",
            future.len(),
            last.date
        )));
    }

    let mut entries: Vec<CalendarEntry> = observations
        .iter()
        .map(|o| CalendarEntry {
            date: o.date,
            holiday_flag: o.holiday_flag,
            is_history: true,
        })
        .collect();

    entries.extend(future.into_iter().map(|date| CalendarEntry {
        date,
        holiday_flag: false,
        is_history: false,
    }));

    let (matched_holidays, unmatched_holidays) = apply_known_holidays(&mut entries, known);
    for date in &unmatched_holidays {
        tracing::debug!(%date, "declared holiday not in prediction calendar");
    }

    Ok(PredictionCalendar {
        entries,
        matched_holidays,
        unmatched_holidays,
    })
}

/// Final write: declared holidays override any earlier flag.
fn apply_known_holidays(entries: &mut [CalendarEntry], known: &KnownHolidays) -> (Vec<NaiveDate>, Vec<NaiveDate>) {
    let mut matched = Vec::new();
    let mut unmatched = Vec::new();

    for date in known.iter() {
        // Entries are date-sorted, so a binary search locates the slot.
        match entries.binary_search_by_key(&date, |e| e.date) {
            Ok(idx) => {
                entries[idx].holiday_flag = true;
                matched.push(date);
            }
            Err(_) => unmatched.push(date),
        }
    }

    (matched, unmatched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn obs(date: NaiveDate, value: f64, holiday_flag: bool) -> ObservationRecord {
        ObservationRecord {
            date,
            value,
            holiday_flag,
        }
    }

    fn history() -> Vec<ObservationRecord> {
        // Mon 2025-08-04 .. Fri 2025-08-08
        (4..=8).map(|day| obs(d(2025, 8, day), 10.0, day == 6)).collect()
    }

    #[test]
    fn horizon_days_follow_history_and_default_to_non_holiday() {
        let cal = build_calendar(&history(), 3, &KnownHolidays::new()).unwrap();
        let dates: Vec<_> = cal.entries.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![
                d(2025, 8, 4),
                d(2025, 8, 5),
                d(2025, 8, 6),
                d(2025, 8, 7),
                d(2025, 8, 8),
                d(2025, 8, 11),
                d(2025, 8, 12),
                d(2025, 8, 13),
            ]
        );
        assert_eq!(cal.future_len(), 3);
        assert!(cal.entries[2].holiday_flag);
        assert!(cal.entries[5..].iter().all(|e| !e.holiday_flag && !e.is_history));
        assert!(cal.entries[..5].iter().all(|e| e.is_history));
    }

    #[test]
    fn declared_holiday_wins_over_history_and_default() {
        // One horizon date and one historical date that history says is a normal day.
        let known: KnownHolidays = [d(2025, 8, 12), d(2025, 8, 5)].into_iter().collect();
        let cal = build_calendar(&history(), 3, &known).unwrap();

        let flag = |date| cal.entries.iter().find(|e| e.date == date).unwrap().holiday_flag;
        assert!(flag(d(2025, 8, 12)));
        assert!(flag(d(2025, 8, 5)));
        assert!(!flag(d(2025, 8, 11)));
        assert_eq!(cal.matched_holidays, vec![d(2025, 8, 5), d(2025, 8, 12)]);
        assert!(cal.unmatched_holidays.is_empty());
    }

    #[test]
    fn weekend_or_distant_declaration_is_ignored() {
        // Sat 2025-08-09 and a date far past the horizon.
        let known: KnownHolidays = [d(2025, 8, 9), d(2025, 12, 25)].into_iter().collect();
        let cal = build_calendar(&history(), 3, &known).unwrap();
        assert!(cal.entries.iter().all(|e| e.date != d(2025, 8, 9)));
        assert_eq!(cal.entries.iter().filter(|e| e.holiday_flag).count(), 1);
        assert_eq!(cal.unmatched_holidays, vec![d(2025, 8, 9), d(2025, 12, 25)]);
    }

    #[test]
    fn zero_horizon_is_history_only() {
        let cal = build_calendar(&history(), 0, &KnownHolidays::new()).unwrap();
        assert_eq!(cal.entries.len(), 5);
        assert_eq!(cal.future_len(), 0);
    }

    #[test]
    fn horizon_past_end_of_calendar_is_rejected() {
        let near_end = NaiveDate::MAX.checked_sub_days(chrono::Days::new(10)).unwrap();
        let err = build_calendar(&[obs(near_end, 1.0, false)], 20, &KnownHolidays::new()).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter(_)));
    }

    #[test]
    fn unsorted_or_repeated_history_is_rejected() {
        // Declared holiday on the earlier date would be missed by a lookup on unsorted entries.
        let known: KnownHolidays = [d(2025, 8, 4)].into_iter().collect();
        let unsorted = vec![obs(d(2025, 8, 5), 10.0, false), obs(d(2025, 8, 4), 10.0, false)];
        let err = build_calendar(&unsorted, 2, &known).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter(_)));

        let repeated = vec![obs(d(2025, 8, 4), 10.0, false), obs(d(2025, 8, 4), 11.0, false)];
        let err = build_calendar(&repeated, 2, &known).unwrap_err();
        assert_eq!(err, ForecastError::DuplicateObservation { date: d(2025, 8, 4) });
    }

    #[test]
    fn empty_history_cannot_anchor_a_horizon() {
        let err = build_calendar(&[], 5, &KnownHolidays::new()).unwrap_err();
        assert_eq!(err, ForecastError::InsufficientData { needed: 1, got: 0 });
    }
}
