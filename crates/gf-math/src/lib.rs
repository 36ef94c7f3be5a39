//! Glucose forecast math utilities.

pub mod math;

pub use math::cov::SymCov2;
pub use math::interval::{Interval, Z_95};
pub use math::stable::*;
