//! Formatted terminal output: run summary and forecast table.
//!
//! Formatting lives here so the pipeline stays free of presentation concerns.

use crate::app::pipeline::RunOutput;
use crate::domain::{DisplayRow, ForecastConfig};

/// Format the run summary (dataset stats, calendar, fit diagnostics).
pub fn format_run_summary(run: &RunOutput, config: &ForecastConfig) -> String {
    let mut out = String::new();
    let p = &run.pipeline;
    let stats = &p.stats;

    out.push_str("=== pickup-forecast - Pickup Stop Forecast (holiday-aware) ===\n");
    out.push_str(&format!(
        "History: rows read={} used={} skipped={}\n",
        run.ingest.rows_read,
        run.ingest.rows_used(),
        run.ingest.row_errors.len()
    ));
    for e in run.ingest.row_errors.iter().take(5) {
        out.push_str(&format!("  line {}: {}\n", e.line, e.message));
    }
    if run.ingest.row_errors.len() > 5 {
        out.push_str(&format!("  ... {} more\n", run.ingest.row_errors.len() - 5));
    }
    out.push_str(&format!(
        "Business days: n={} | {} .. {} | stops=[{}, {}] | holidays={}\n",
        stats.n_points, stats.first_date, stats.last_date, stats.value_min, stats.value_max, stats.holidays
    ));

    out.push_str(&format!(
        "Horizon: {} business days | interval: {:.0}%\n",
        p.calendar.future_len(),
        config.interval_width * 100.0
    ));
    out.push_str(&format!(
        "Declared holidays: {} in calendar, {} outside\n",
        p.calendar.matched_holidays.len(),
        p.calendar.unmatched_holidays.len()
    ));
    out.push_str(&format!("Holiday overrides applied: {}\n", p.overridden));

    if let Some(q) = &p.quality {
        out.push_str(&format!(
            "\nModel fit: n={} features={} SSE={:.3} RMSE={:.3} sigma={:.3}\n",
            q.n, q.n_features, q.sse, q.rmse, q.sigma
        ));
    }
    out.push('\n');
    out
}

/// Format the display table. `last` limits output to the final N rows (0 = all).
pub fn format_table(rows: &[DisplayRow], last: usize) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<10} {:>8} {:>10} {:>10} {:>10} {:>7}\n",
            "date", "actual", "forecast", "lower", "upper", "holiday"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<10} {:-<8} {:-<10} {:-<10} {:-<10} {:-<7}\n", "", "", "", "", "", "").trim_end());
    out.push('\n');

    let skip = if last == 0 { 0 } else { rows.len().saturating_sub(last) };
    for r in &rows[skip..] {
        let f = r.forecast;
        out.push_str(
            format!(
                "{:<10} {:>8} {:>10} {:>10} {:>10} {:>7}\n",
                r.date,
                fmt_cell(r.actual, 0),
                fmt_cell(f.map(|v| v.point), 2),
                fmt_cell(f.map(|v| v.lower), 2),
                fmt_cell(f.map(|v| v.upper), 2),
                if r.holiday_flag { "yes" } else { "" },
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn fmt_cell(v: Option<f64>, decimals: usize) -> String {
    match v {
        Some(x) => format!("{x:.decimals$}"),
        None => "-".to_string(),
    }
}
