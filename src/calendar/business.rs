//! Business-day arithmetic.
//!
//! A business day is Monday–Friday. Public holidays are *not* skipped here:
//! they stay in the calendar and are handled through holiday flags.

use chrono::{Datelike, Days, NaiveDate, Weekday};

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First business day strictly after `date`.
pub fn next_business_day(date: NaiveDate) -> Option<NaiveDate> {
    let mut d = date.checked_add_days(Days::new(1))?;
    while !is_business_day(d) {
        d = d.checked_add_days(Days::new(1))?;
    }
    Some(d)
}

/// The `count` business days strictly after `date`, ascending.
///
/// Stops early only at the end of chrono's representable range; callers that
/// need exactly `count` dates must check the length.
pub fn business_days_after(date: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut cursor = date;
    while out.len() < count {
        let Some(next) = next_business_day(cursor) else {
            break;
        };
        out.push(next);
        cursor = next;
    }
    out
}
