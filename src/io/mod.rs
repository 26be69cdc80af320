//! Input/output helpers.
//!
//! - history CSV ingest + validation (`ingest`)
//! - display table export and re-parse (`export`)
//! - fitted model JSON (`model`)

pub mod export;
pub mod ingest;
pub mod model;

pub use export::*;
pub use ingest::*;
pub use model::*;
