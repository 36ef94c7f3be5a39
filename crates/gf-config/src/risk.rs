//! Risk classification thresholds (mmol/L, mmol/L per minute).

use serde::{Deserialize, Serialize};

use crate::validate::{positive, ValidationError, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub severe_low: f64,
    pub low: f64,
    pub borderline_low: f64,
    pub borderline_high: f64,
    pub high: f64,
    pub severe_high: f64,
    /// Minimum |velocity| (per minute) for a recovery override.
    pub recovery_velocity: f64,
    /// |velocity| per hour above which the trend counts as fast.
    pub fast_trend_per_hour: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            severe_low: 3.0,
            low: 3.9,
            borderline_low: 4.5,
            borderline_high: 9.0,
            high: 10.0,
            severe_high: 13.9,
            recovery_velocity: 0.01,
            fast_trend_per_hour: 1.0,
        }
    }
}

impl RiskThresholds {
    /// Whether `value` lies in the target range `[low, high]`.
    pub fn in_range(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    pub fn validate(&self) -> ValidationResult {
        let ladder = [
            ("severe_low", self.severe_low),
            ("low", self.low),
            ("borderline_low", self.borderline_low),
            ("borderline_high", self.borderline_high),
            ("high", self.high),
            ("severe_high", self.severe_high),
        ];
        for (name, value) in ladder {
            positive("risk", name, value)?;
        }
        for pair in ladder.windows(2) {
            let (lower_name, lower) = pair[0];
            let (upper_name, upper) = pair[1];
            if lower >= upper {
                return Err(ValidationError::invalid(
                    "risk",
                    upper_name,
                    format!("must exceed {lower_name} ({lower}), got {upper}"),
                ));
            }
        }
        positive("risk", "recovery_velocity", self.recovery_velocity)?;
        positive("risk", "fast_trend_per_hour", self.fast_trend_per_hour)?;
        Ok(())
    }
}
