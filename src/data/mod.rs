//! Data sources other than user-supplied files.

pub mod sample;

pub use sample::*;
