//! In-place estimator wrapping the pure [`State`] transitions.
//!
//! One `StateEstimator` belongs to one forecast run. Concurrent callers each
//! build their own; an estimator is never shared between requests.

use gf_config::ParameterProfile;

use super::state::State;

/// Mutable glucose/velocity estimator.
#[derive(Debug, Clone)]
pub struct StateEstimator {
    state: State,
    params: ParameterProfile,
    update_count: u64,
}

impl StateEstimator {
    /// Estimator sitting at the neutral state for `params`.
    pub fn new(params: ParameterProfile) -> Self {
        Self {
            state: State::neutral(&params),
            params,
            update_count: 0,
        }
    }

    /// Estimator cold-started at a first measurement.
    pub fn starting_at(glucose: f64, params: ParameterProfile) -> Self {
        Self {
            state: State::cold_start(glucose),
            params,
            update_count: 1,
        }
    }

    /// Advance `dt` minutes with no measurement.
    pub fn predict(&mut self, dt: f64) {
        self.state = self.state.predict(dt, &self.params);
    }

    /// Correct the state with a glucose measurement.
    pub fn update(&mut self, measurement: f64) {
        self.state = self.state.update(measurement, &self.params);
        self.update_count += 1;
    }

    /// Discard the trajectory and cold-start at `glucose`.
    pub fn reset(&mut self, glucose: f64) {
        self.state = State::cold_start(glucose);
        self.update_count = 1;
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> State {
        self.state
    }

    pub fn glucose(&self) -> f64 {
        self.state.glucose
    }

    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    /// Measurements absorbed since the last reset (the cold-start reading counts).
    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}
