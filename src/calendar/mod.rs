//! Business-day calendar handling.
//!
//! - weekday arithmetic (`business`)
//! - history normalization (`filter`)
//! - prediction calendar construction (`builder`)

pub mod builder;
pub mod business;
pub mod filter;

pub use builder::*;
pub use business::*;
pub use filter::*;
