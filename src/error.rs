//! Error types.
//!
//! Two layers:
//!
//! - [`ForecastError`]: the pipeline's own failure modes. Every variant means a
//!   precondition was violated, so none of them are handled locally.
//! - [`AppError`]: what the binary reports, an exit code plus a message.

use chrono::NaiveDate;
use thiserror::Error;

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Failures raised by the forecasting pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Two historical records normalize to the same business day.
    #[error("duplicate observation for {date}: cannot decide how to aggregate")]
    DuplicateObservation { date: NaiveDate },

    /// Not enough history for the engine to fit.
    #[error("insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The engine did not return a prediction for a requested date.
    #[error("engine returned no prediction for scheduled date {date}")]
    MissingSchedule { date: NaiveDate },

    /// A declared holiday could not be parsed as a date.
    #[error("invalid holiday override '{value}': expected YYYY-MM-DD")]
    InvalidHolidayOverride { value: String },

    /// A configuration value is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numerical failure inside the engine.
    #[error("computation error: {0}")]
    Computation(String),
}

impl ForecastError {
    /// Exit code used when this error reaches the binary.
    ///
    /// 2 = bad input/config, 3 = unusable data, 4 = engine or contract failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ForecastError::InvalidHolidayOverride { .. } | ForecastError::InvalidParameter(_) => 2,
            ForecastError::DuplicateObservation { .. } | ForecastError::InsufficientData { .. } => 3,
            ForecastError::MissingSchedule { .. } | ForecastError::Computation(_) => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ForecastError> for AppError {
    fn from(err: ForecastError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        let err = ForecastError::DuplicateObservation { date };
        assert!(err.to_string().contains("2025-07-04"));

        let err = ForecastError::InsufficientData { needed: 2, got: 1 };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 2 observations, got 1"
        );

        let err = ForecastError::InvalidHolidayOverride {
            value: "12/25".to_string(),
        };
        assert!(err.to_string().contains("'12/25'"));
    }

    #[test]
    fn app_error_keeps_exit_code_from_forecast_error() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let app: AppError = ForecastError::MissingSchedule { date }.into();
        assert_eq!(app.exit_code(), 4);
        assert!(app.to_string().contains("2025-01-02"));

        let app: AppError = ForecastError::InsufficientData { needed: 2, got: 0 }.into();
        assert_eq!(app.exit_code(), 3);

        let app: AppError = ForecastError::InvalidParameter("x".into()).into();
        assert_eq!(app.exit_code(), 2);
    }
}
