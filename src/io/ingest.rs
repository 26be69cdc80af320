//! CSV ingest of pickup history.
//!
//! Turns a history export into `RawRecord`s. Calendar filtering and holiday
//! encoding happen later; this module only deals with the file:
//!
//! - **Strict schema** for required columns (exit code 2)
//! - **Row-level validation**: bad rows are skipped and reported
//! - header aliases for the original site export (`StopDate`,
//!   `NumberOfPickupStops`, `HolidayFlag`)

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::domain::RawRecord;
use crate::error::AppError;

const DATE_COLUMNS: [&str; 3] = ["date", "stopdate", "ds"];
const VALUE_COLUMNS: [&str; 3] = ["value", "numberofpickupstops", "y"];
const HOLIDAY_COLUMNS: [&str; 3] = ["holiday_indicator", "holidayflag", "holiday"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: parsed records + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub records: Vec<RawRecord>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl IngestedData {
    pub fn rows_used(&self) -> usize {
        self.records.len()
    }
}

struct Columns {
    date: usize,
    value: usize,
    holiday: Option<usize>,
}

/// Load history from a CSV file.
pub fn load_history(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open history CSV '{}': {e}", path.display())))?;
    read_history(file)
}

/// Parse history CSV from any reader.
pub fn read_history<R: Read>(input: R) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let columns = resolve_columns(&build_header_map(&headers))?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1.
        let line = idx + 2;
        rows_read += 1;

        let parsed = result
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|record| parse_row(&record, &columns));
        match parsed {
            Ok(r) => records.push(r),
            Err(message) => {
                tracing::warn!(line, %message, "skipping history row");
                row_errors.push(RowError { line, message });
            }
        }
    }

    if records.is_empty() {
        return Err(AppError::new(3, "No valid history rows remain after validation."));
    }

    tracing::info!(rows_read, rows_used = records.len(), "history loaded");
    Ok(IngestedData {
        records,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel CSVs often carry a UTF-8 BOM on the first header.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn find_column(header_map: &HashMap<String, usize>, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|a| header_map.get(*a).copied())
}

fn resolve_columns(header_map: &HashMap<String, usize>) -> Result<Columns, AppError> {
    let date = find_column(header_map, &DATE_COLUMNS)
        .ok_or_else(|| AppError::new(2, "Missing required column: `date` (or `StopDate`)"))?;
    let value = find_column(header_map, &VALUE_COLUMNS)
        .ok_or_else(|| AppError::new(2, "Missing required column: `value` (or `NumberOfPickupStops`)"))?;
    let holiday = find_column(header_map, &HOLIDAY_COLUMNS);
    if holiday.is_none() {
        tracing::warn!("no holiday indicator column; every historical day is treated as a working day");
    }
    Ok(Columns { date, value, holiday })
}

fn parse_row(record: &StringRecord, columns: &Columns) -> Result<RawRecord, String> {
    let date = parse_date(get_required(record, columns.date, "date")?)?;

    let raw_value = get_required(record, columns.value, "value")?;
    let value = raw_value
        .parse::<f64>()
        .map_err(|_| format!("Invalid value '{raw_value}'."))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("Value must be a finite non-negative count, got '{raw_value}'."));
    }

    let holiday_indicator = columns
        .holiday
        .and_then(|idx| record.get(idx))
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(RawRecord {
        date,
        value,
        holiday_indicator,
    })
}

fn get_required<'a>(record: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str, String> {
    record
        .get(idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

/// Parse a calendar date, discarding any time-of-day part.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    const DATETIME_FMTS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
    const DATE_FMTS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY (time of day allowed)."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn reads_original_export_headers() {
        let csv = "\u{feff}StopDate,NumberOfPickupStops,HolidayFlag\n\
                   2025-07-03 00:00:00,41,No\n\
                   2025-07-04,0,Yes\n\
                   07/07/2025,38,\n";
        let data = read_history(csv.as_bytes()).unwrap();
        assert_eq!(data.rows_read, 3);
        assert_eq!(data.rows_used(), 3);
        assert!(data.row_errors.is_empty());

        assert_eq!(data.records[0].date, d(2025, 7, 3));
        assert_eq!(data.records[0].holiday_indicator.as_deref(), Some("No"));
        assert_eq!(data.records[1].holiday_indicator.as_deref(), Some("Yes"));
        assert_eq!(data.records[2].date, d(2025, 7, 7));
        assert_eq!(data.records[2].holiday_indicator, None);
    }

    #[test]
    fn bad_rows_are_skipped_and_reported() {
        let csv = "date,value,holiday_indicator\n\
                   2025-07-01,12,\n\
                   not-a-date,5,\n\
                   2025-07-02,-3,\n\
                   2025-07-03,,\n\
                   2025-07-07,abc,\n";
        let data = read_history(csv.as_bytes()).unwrap();
        assert_eq!(data.rows_read, 5);
        assert_eq!(data.rows_used(), 1);
        let lines: Vec<_> = data.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 5, 6]);
    }

    #[test]
    fn missing_required_column_is_a_schema_error() {
        let err = read_history("date,holiday_indicator\n2025-07-01,No\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("value"));
    }

    #[test]
    fn no_usable_rows_is_a_data_error() {
        let err = read_history("date,value\nbad,1\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn holiday_column_is_optional() {
        let data = read_history("ds,y\n2025-07-01,4\n".as_bytes()).unwrap();
        assert_eq!(data.records[0].holiday_indicator, None);
        assert_eq!(data.records[0].value, 4.0);
    }

    #[test]
    fn datetime_inputs_drop_time_of_day() {
        assert_eq!(parse_date("2025-08-14T13:45:00").unwrap(), d(2025, 8, 14));
        assert_eq!(parse_date("2025/08/14").unwrap(), d(2025, 8, 14));
        assert!(parse_date("14.08.2025").is_err());
    }
}
