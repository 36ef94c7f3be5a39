//! Forward projection settings.

use serde::{Deserialize, Serialize};

use crate::profile::ParameterProfile;
use crate::validate::{non_negative, positive, ValidationError, ValidationResult};

/// Upper bound on points per projection, guards against `horizon / step` blowups.
pub const MAX_PROJECTION_POINTS: f64 = 10_000.0;

/// Longest horizon a config may request (one day).
pub const MAX_HORIZON_MINUTES: f64 = 1_440.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Step between projected points; `None` uses the profile's sample interval.
    pub step_minutes: Option<f64>,
    /// Longest offset projected before the adaptive cut.
    pub horizon_minutes: f64,
    /// Points whose `upper - lower` exceeds this are discarded (mmol/L).
    pub max_band_width: f64,
    /// Multiplier on glucose process noise while projecting.
    pub process_noise_inflation: f64,
    /// Offset of the projected value handed to the risk classifier.
    pub near_horizon_minutes: f64,
    /// z-score of the confidence band.
    pub confidence_z: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            step_minutes: None,
            horizon_minutes: 120.0,
            max_band_width: 4.0,
            process_noise_inflation: 2.0,
            near_horizon_minutes: 15.0,
            confidence_z: gf_math::Z_95,
        }
    }
}

impl ProjectionConfig {
    /// Step actually used for `profile`.
    pub fn effective_step(&self, profile: &ParameterProfile) -> f64 {
        self.step_minutes.unwrap_or(profile.sample_interval_minutes)
    }

    pub fn validate(&self, profile: &ParameterProfile) -> ValidationResult {
        if let Some(step) = self.step_minutes {
            positive("projection", "step_minutes", step)?;
        }
        non_negative("projection", "horizon_minutes", self.horizon_minutes)?;
        if self.horizon_minutes > MAX_HORIZON_MINUTES {
            return Err(ValidationError::invalid(
                "projection",
                "horizon_minutes",
                format!(
                    "must be at most {MAX_HORIZON_MINUTES}, got {}",
                    self.horizon_minutes
                ),
            ));
        }
        positive("projection", "max_band_width", self.max_band_width)?;
        positive("projection", "confidence_z", self.confidence_z)?;
        non_negative("projection", "near_horizon_minutes", self.near_horizon_minutes)?;
        if !(self.process_noise_inflation.is_finite() && self.process_noise_inflation >= 1.0) {
            return Err(ValidationError::invalid(
                "projection",
                "process_noise_inflation",
                format!("must be finite and >= 1, got {}", self.process_noise_inflation),
            ));
        }
        let step = self.effective_step(profile);
        if step > 0.0 && self.horizon_minutes / step > MAX_PROJECTION_POINTS {
            return Err(ValidationError::invalid(
                "projection",
                "horizon_minutes",
                format!(
                    "horizon {} / step {} exceeds {} points",
                    self.horizon_minutes, step, MAX_PROJECTION_POINTS
                ),
            ));
        }
        Ok(())
    }
}
