//! Adaptive horizon: keep only points whose band is still narrow enough to use.
//!
//! The cut depends on how fast uncertainty grows for the particular state, not
//! on a fixed time limit.

use super::projector::ProjectionPoint;

/// Default maximum band width (mmol/L) for a usable point.
pub const DEFAULT_MAX_BAND_WIDTH: f64 = 4.0;

/// Drop every point whose `upper - lower` exceeds `max_width`.
pub fn apply_adaptive_horizon(
    points: &[ProjectionPoint],
    max_width: f64,
) -> Vec<ProjectionPoint> {
    points
        .iter()
        .copied()
        .filter(|p| p.width() <= max_width)
        .collect()
}

/// Furthest offset still present, `None` if nothing survived.
pub fn usable_horizon_minutes(points: &[ProjectionPoint]) -> Option<f64> {
    points.last().map(|p| p.offset_minutes)
}

/// First point at or beyond `near_minutes`, else the last point.
pub fn near_horizon_point(
    points: &[ProjectionPoint],
    near_minutes: f64,
) -> Option<&ProjectionPoint> {
    points
        .iter()
        .find(|p| p.offset_minutes >= near_minutes)
        .or_else(|| points.last())
}
