//! Forecasting engines.
//!
//! `engine` defines the capability the pipeline calls; `additive` is the
//! regression model used by the binary.

pub mod additive;
pub mod engine;

pub use additive::*;
pub use engine::*;
