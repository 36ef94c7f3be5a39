//! Forward projection with a growing confidence band.
//!
//! The projector runs the predict equations on a private copy of the state.
//! No measurement corrects the copy, so the glucose process noise is inflated
//! (2x by default) to widen the band faster than live filtering would.

use chrono::{DateTime, Duration, Utc};
use gf_config::{ParameterProfile, ProjectionConfig, MAX_PROJECTION_POINTS};
use gf_math::Interval;
use serde::{Deserialize, Serialize};

use crate::estimate::State;

/// Lowest physiologically reportable glucose (mmol/L).
pub const PHYS_MIN: f64 = 1.0;
/// Highest physiologically reportable glucose (mmol/L).
pub const PHYS_MAX: f64 = 25.0;

/// One projected value with its clamped confidence band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub offset_time: DateTime<Utc>,
    pub offset_minutes: f64,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ProjectionPoint {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Projector {
    params: ParameterProfile,
    step_minutes: f64,
    horizon_minutes: f64,
    noise_inflation: f64,
    z: f64,
}

impl Projector {
    pub fn new(params: ParameterProfile, config: &ProjectionConfig) -> Self {
        Self {
            params,
            step_minutes: config.effective_step(&params),
            horizon_minutes: config.horizon_minutes,
            noise_inflation: config.process_noise_inflation,
            z: config.confidence_z,
        }
    }

    pub fn with_step(mut self, step_minutes: f64) -> Self {
        self.step_minutes = step_minutes;
        self
    }

    pub fn with_horizon(mut self, horizon_minutes: f64) -> Self {
        self.horizon_minutes = horizon_minutes;
        self
    }

    /// Points at offsets `0, step, 2·step, …` up to and including the horizon.
    ///
    /// A non-positive or non-finite step yields only the origin point. At most
    /// [`MAX_PROJECTION_POINTS`] steps are taken, and the projection ends early
    /// once an offset no longer fits a timestamp.
    pub fn project(&self, state: &State, origin: DateTime<Utc>) -> Vec<ProjectionPoint> {
        let steps = self.step_count();
        let q_glucose = self.params.process_noise_glucose * self.noise_inflation;

        let mut points = Vec::with_capacity(steps + 1);
        let mut local = *state;
        for i in 0..=steps {
            let offset = i as f64 * self.step_minutes;
            let Some(point) = self.point_at(&local, origin, offset) else {
                break;
            };
            points.push(point);
            if i < steps {
                local = local.advance(self.step_minutes, &self.params, q_glucose);
            }
        }
        points
    }

    fn step_count(&self) -> usize {
        if !(self.step_minutes.is_finite() && self.step_minutes > 0.0) {
            return 0;
        }
        if !(self.horizon_minutes.is_finite() && self.horizon_minutes > 0.0) {
            return 0;
        }
        let steps = (self.horizon_minutes / self.step_minutes + 1e-9).floor();
        steps.min(MAX_PROJECTION_POINTS) as usize
    }

    fn point_at(
        &self,
        state: &State,
        origin: DateTime<Utc>,
        offset_minutes: f64,
    ) -> Option<ProjectionPoint> {
        let millis = (offset_minutes * 60_000.0).round();
        if !(millis.is_finite() && millis.abs() < i64::MAX as f64) {
            return None;
        }
        let offset_time = origin.checked_add_signed(Duration::try_milliseconds(millis as i64)?)?;
        let band = Interval::gaussian(state.glucose, state.var_glucose, self.z)
            .clamped(PHYS_MIN, PHYS_MAX);
        Some(ProjectionPoint {
            offset_time,
            offset_minutes,
            value: band.value,
            lower: band.lower,
            upper: band.upper,
        })
    }
}
