//! Ordered, first-match-wins risk rules.
//!
//! Inputs are the current filtered glucose, its velocity (mmol/L per minute),
//! and the value projected about 15 minutes ahead. Rule order matters: the
//! recovery overrides sit between the severe checks and the plain projected
//! checks, so a falling-then-recovering low never escalates to Urgent.

use std::fmt;

use gf_config::RiskThresholds;
use serde::{Deserialize, Serialize};

pub const MSG_SEVERE_LOW: &str = "Severe low risk";
pub const MSG_SEVERE_HIGH: &str = "Severe high risk";
pub const MSG_RECOVERING_UP: &str = "Recovering ↑";
pub const MSG_RECOVERING_DOWN: &str = "Recovering ↓";
pub const MSG_LOW_PROJECTED: &str = "Low projected";
pub const MSG_HIGH_PROJECTED: &str = "High projected";
pub const MSG_RISING_FAST: &str = "Rising fast";
pub const MSG_FALLING_FAST: &str = "Falling fast";
pub const MSG_LOW_ISH: &str = "Low-ish";
pub const MSG_HIGH_ISH: &str = "High-ish";
pub const MSG_STABLE: &str = "Stable";

/// Alert severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Safe,
    Watch,
    Warning,
    Urgent,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Safe => write!(f, "safe"),
            RiskLevel::Watch => write!(f, "watch"),
            RiskLevel::Warning => write!(f, "warning"),
            RiskLevel::Urgent => write!(f, "urgent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub message: String,
}

impl RiskAssessment {
    fn new(level: RiskLevel, message: &str) -> Self {
        Self {
            level,
            message: message.to_string(),
        }
    }
}

/// Classify with explicit thresholds.
pub fn classify(
    current: f64,
    velocity: f64,
    projected_near: f64,
    t: &RiskThresholds,
) -> RiskAssessment {
    let recovering_from_low = current < t.low && velocity > t.recovery_velocity;
    let recovering_from_high = current > t.high && velocity < -t.recovery_velocity;

    let recovery_level = |projected: f64| {
        if t.in_range(projected) {
            RiskLevel::Safe
        } else {
            RiskLevel::Watch
        }
    };

    if projected_near < t.severe_low && !recovering_from_low {
        return RiskAssessment::new(RiskLevel::Urgent, MSG_SEVERE_LOW);
    }
    if projected_near > t.severe_high && !recovering_from_high {
        return RiskAssessment::new(RiskLevel::Urgent, MSG_SEVERE_HIGH);
    }
    if recovering_from_low && projected_near >= t.severe_low {
        return RiskAssessment::new(recovery_level(projected_near), MSG_RECOVERING_UP);
    }
    if recovering_from_high && projected_near <= t.severe_high {
        return RiskAssessment::new(recovery_level(projected_near), MSG_RECOVERING_DOWN);
    }
    if projected_near < t.low {
        return RiskAssessment::new(RiskLevel::Warning, MSG_LOW_PROJECTED);
    }
    if projected_near > t.high {
        return RiskAssessment::new(RiskLevel::Warning, MSG_HIGH_PROJECTED);
    }
    if (velocity * 60.0).abs() > t.fast_trend_per_hour {
        let message = if velocity > 0.0 {
            MSG_RISING_FAST
        } else {
            MSG_FALLING_FAST
        };
        return RiskAssessment::new(RiskLevel::Watch, message);
    }
    if current < t.borderline_low {
        return RiskAssessment::new(RiskLevel::Watch, MSG_LOW_ISH);
    }
    if current > t.borderline_high {
        return RiskAssessment::new(RiskLevel::Watch, MSG_HIGH_ISH);
    }
    RiskAssessment::new(RiskLevel::Safe, MSG_STABLE)
}

/// Classify with the default thresholds.
pub fn classify_default(current: f64, velocity: f64, projected_near: f64) -> RiskAssessment {
    classify(current, velocity, projected_near, &RiskThresholds::default())
}
