//! Glucose/velocity state and its pure predict/update transitions.
//!
//! # State Model
//!
//! ```text
//! State:       x = [glucose, velocity]
//! Transition:  glucose'  = glucose + velocity·dt
//!              velocity' = velocity·d^dt + (target - glucose)·r·dt
//! Observation: H = [1, 0]
//! ```
//!
//! `d` is the per-minute damping factor and `r` the mean-reversion rate. The
//! covariance is propagated in closed form rather than through matrix
//! products; only one cross term is stored.

use gf_config::ParameterProfile;
use gf_math::{floor_at, SymCov2};
use serde::{Deserialize, Serialize};

/// Lowest glucose variance the state may hold.
pub const VAR_GLUCOSE_FLOOR: f64 = 1e-3;
/// Lowest velocity variance the state may hold.
pub const VAR_VELOCITY_FLOOR: f64 = 1e-4;

/// Glucose variance at cold start or after a gap reset.
pub const INITIAL_VAR_GLUCOSE: f64 = 1.0;
/// Velocity variance at cold start or after a gap reset.
pub const INITIAL_VAR_VELOCITY: f64 = 0.1;

/// Filtered estimate of glucose (mmol/L) and velocity (mmol/L per minute).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub glucose: f64,
    pub velocity: f64,
    pub var_glucose: f64,
    pub var_velocity: f64,
    pub cov_gv: f64,
}

impl State {
    /// Fresh state at `glucose` with zero velocity and wide variances.
    pub fn cold_start(glucose: f64) -> Self {
        Self {
            glucose,
            velocity: 0.0,
            var_glucose: INITIAL_VAR_GLUCOSE,
            var_velocity: INITIAL_VAR_VELOCITY,
            cov_gv: 0.0,
        }
    }

    /// Neutral state used when there are no readings at all.
    pub fn neutral(params: &ParameterProfile) -> Self {
        Self::cold_start(params.mean_target)
    }

    pub fn covariance(&self) -> SymCov2 {
        SymCov2::new(self.var_glucose, self.var_velocity, self.cov_gv)
    }

    /// Advance `dt` minutes without a measurement.
    ///
    /// `dt` must be non-negative; callers are responsible for that.
    pub fn predict(&self, dt: f64, params: &ParameterProfile) -> State {
        self.advance(dt, params, params.process_noise_glucose)
    }

    /// Same transition as [`State::predict`] with a caller-chosen glucose
    /// process noise. The projector uses this to inflate uncertainty.
    pub(crate) fn advance(&self, dt: f64, params: &ParameterProfile, q_glucose: f64) -> State {
        let damping = params.damping_factor.powf(dt);
        let mean_reversion = (params.mean_target - self.glucose) * params.reversion_rate * dt;

        let (pgg, pvv, pgv) = (self.var_glucose, self.var_velocity, self.cov_gv);

        State {
            glucose: self.glucose + self.velocity * dt,
            velocity: self.velocity * damping + mean_reversion,
            var_glucose: pgg + 2.0 * dt * pgv + dt * dt * pvv + q_glucose * dt,
            var_velocity: damping * damping * pvv + params.process_noise_velocity * dt,
            cov_gv: damping * (pgv + dt * pvv),
        }
        .floored()
    }

    /// Incorporate one glucose measurement.
    pub fn update(&self, measurement: f64, params: &ParameterProfile) -> State {
        let (pgg, pvv, pgv) = (self.var_glucose, self.var_velocity, self.cov_gv);

        let innovation = measurement - self.glucose;
        let s = pgg + params.measurement_noise;
        let k_g = pgg / s;
        let k_v = pgv / s;

        State {
            glucose: self.glucose + k_g * innovation,
            velocity: self.velocity + k_v * innovation,
            var_glucose: (1.0 - k_g) * pgg,
            var_velocity: pvv - k_v * pgv,
            cov_gv: (1.0 - k_g) * pgv,
        }
        .floored()
    }

    fn floored(mut self) -> Self {
        self.var_glucose = floor_at(self.var_glucose, VAR_GLUCOSE_FLOOR);
        self.var_velocity = floor_at(self.var_velocity, VAR_VELOCITY_FLOOR);
        self
    }
}
