//! Post-fit stages: engine adapter, holiday overrides, reconciliation.

pub mod adapter;
pub mod overrides;
pub mod reconcile;

pub use adapter::*;
pub use overrides::*;
pub use reconcile::*;
