//! Holiday flag encoding.
//!
//! Historical flags come from a categorical column where exactly `"Yes"` means
//! holiday. Future flags come from [`KnownHolidays`], a set of explicitly
//! declared dates that overrides every other source.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::{ForecastError, Result};

/// The only indicator value that marks a holiday. Case-sensitive.
pub const HOLIDAY_SENTINEL: &str = "Yes";

/// Holidays declared when the caller does not supply a list.
pub const DEFAULT_KNOWN_HOLIDAYS: [&str; 2] = ["2025-08-14", "2025-12-25"];

/// Encode a raw holiday indicator as a boolean regressor.
pub fn encode_indicator(raw: Option<&str>) -> bool {
    raw == Some(HOLIDAY_SENTINEL)
}

/// Declared future holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownHolidays {
    dates: BTreeSet<NaiveDate>,
}

impl KnownHolidays {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in default list.
    pub fn defaults() -> Self {
        let mut out = Self::new();
        for raw in DEFAULT_KNOWN_HOLIDAYS {
            if let Ok(date) = parse_holiday(raw) {
                out.register(date);
            }
        }
        out
    }

    /// Parse a list of ISO dates. Fails on the first malformed entry.
    pub fn parse<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Self::new();
        for value in values {
            out.register_str(value.as_ref())?;
        }
        Ok(out)
    }

    pub fn register(&mut self, date: NaiveDate) {
        self.dates.insert(date);
    }

    pub fn register_str(&mut self, value: &str) -> Result<()> {
        let date = parse_holiday(value)?;
        self.register(date);
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Declared dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }
}

impl FromIterator<NaiveDate> for KnownHolidays {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

fn parse_holiday(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ForecastError::InvalidHolidayOverride {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_sentinel_is_a_holiday() {
        assert!(encode_indicator(Some("Yes")));
        assert!(!encode_indicator(Some("yes")));
        assert!(!encode_indicator(Some("YES")));
        assert!(!encode_indicator(Some("No")));
        assert!(!encode_indicator(Some("")));
        assert!(!encode_indicator(None));
    }

    #[test]
    fn parse_collects_sorted_unique_dates() {
        let known = KnownHolidays::parse(["2025-12-25", "2025-08-14", "2025-12-25"]).unwrap();
        let dates: Vec<_> = known.iter().collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 8, 14).unwrap(),
                NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
            ]
        );
    }

    #[test]
    fn malformed_date_is_an_invalid_override() {
        let err = KnownHolidays::parse(["2025-08-14", "2025-13-40"]).unwrap_err();
        assert_eq!(
            err,
            ForecastError::InvalidHolidayOverride {
                value: "2025-13-40".to_string()
            }
        );

        let mut known = KnownHolidays::new();
        assert!(known.register_str("next tuesday").is_err());
        assert!(known.is_empty());
    }

    #[test]
    fn defaults_hold_the_builtin_list() {
        let known = KnownHolidays::defaults();
        assert_eq!(known.len(), DEFAULT_KNOWN_HOLIDAYS.len());
        assert!(known.contains(NaiveDate::from_ymd_opt(2025, 8, 14).unwrap()));
    }
}
