//! `pickup-forecast` library crate.
//!
//! The binary (`pickup-forecast`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable without spawning processes
//! - the forecasting engine can be swapped behind `models::ForecastEngine`
//! - presentation (`report`, `io`) stays out of the core stages

pub mod app;
pub mod calendar;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod holiday;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
