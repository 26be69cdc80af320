//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - history records (`RawRecord`, `ObservationRecord`)
//! - the prediction calendar (`CalendarEntry`)
//! - forecast outputs (`ForecastPoint`, `DisplayRow`, `FitQuality`)
//! - run configuration (`ForecastConfig`)

pub mod types;

pub use types::*;
