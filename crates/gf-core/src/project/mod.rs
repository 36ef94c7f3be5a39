//! Forward projection and adaptive horizon truncation.

pub mod horizon;
pub mod projector;

pub use horizon::{
    apply_adaptive_horizon, near_horizon_point, usable_horizon_minutes, DEFAULT_MAX_BAND_WIDTH,
};
pub use projector::{ProjectionPoint, Projector, PHYS_MAX, PHYS_MIN};
