//! Export the reconciled table to CSV, and read it back.
//!
//! Columns: `date,actual,forecast,lower,upper,holiday_flag`. Absent values are
//! empty cells; the flag is `0`/`1`. Floats use Rust's shortest round-trip
//! formatting, so a re-parse reproduces the exact values.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::domain::{DisplayRow, ForecastValues};
use crate::error::AppError;
use crate::io::ingest::parse_date;

pub const TABLE_HEADER: [&str; 6] = ["date", "actual", "forecast", "lower", "upper", "holiday_flag"];

/// Write the display table to a CSV file.
pub fn write_display_csv(path: &Path, rows: &[DisplayRow]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_display_table(file, rows)
}

/// Write the display table as CSV to any writer.
pub fn write_display_table<W: Write>(output: W, rows: &[DisplayRow]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(output);
    writer
        .write_record(TABLE_HEADER)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in rows {
        let f = r.forecast;
        writer
            .write_record([
                r.date.to_string(),
                fmt_opt(r.actual),
                fmt_opt(f.map(|v| v.point)),
                fmt_opt(f.map(|v| v.lower)),
                fmt_opt(f.map(|v| v.upper)),
                if r.holiday_flag { "1" } else { "0" }.to_string(),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Read a previously exported display table.
pub fn read_display_csv(path: &Path) -> Result<Vec<DisplayRow>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open table CSV '{}': {e}", path.display())))?;
    read_display_table(file)
}

/// Parse an exported display table from any reader.
///
/// Unlike history ingest this is strict: any malformed row fails the read.
pub fn read_display_table<R: Read>(input: R) -> Result<Vec<DisplayRow>, AppError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read table headers: {e}")))?;
    if headers.iter().ne(TABLE_HEADER) {
        return Err(AppError::new(
            2,
            format!("Unexpected table header; expected `{}`", TABLE_HEADER.join(",")),
        ));
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record = result.map_err(|e| AppError::new(2, format!("Line {line}: CSV parse error: {e}")))?;
        let field = |i: usize| record.get(i).unwrap_or("");
        let bad = |msg: String| AppError::new(2, format!("Line {line}: {msg}"));

        let date = parse_date(field(0)).map_err(bad)?;
        let actual = parse_opt(field(1)).map_err(bad)?;
        let point = parse_opt(field(2)).map_err(bad)?;
        let lower = parse_opt(field(3)).map_err(bad)?;
        let upper = parse_opt(field(4)).map_err(bad)?;
        let holiday_flag = match field(5) {
            "1" => true,
            "0" | "" => false,
            other => return Err(bad(format!("Invalid holiday_flag '{other}'"))),
        };

        let forecast = match (point, lower, upper) {
            (Some(point), Some(lower), Some(upper)) => Some(ForecastValues { point, lower, upper }),
            (None, None, None) => None,
            _ => return Err(bad("Forecast columns must be all present or all empty".to_string())),
        };

        rows.push(DisplayRow {
            date,
            actual,
            forecast,
            holiday_flag,
        });
    }
    Ok(rows)
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn parse_opt(s: &str) -> Result<Option<f64>, String> {
    if s.is_empty() {
        return Ok(None);
    }
    s.parse::<f64>()
        .map(Some)
        .map_err(|_| format!("Invalid number '{s}'"))
}
