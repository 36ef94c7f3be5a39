//! Gaussian confidence intervals around a point estimate.

use serde::{Deserialize, Serialize};

use super::stable::clamp_to;

/// Two-sided 95% z-score.
pub const Z_95: f64 = 1.96;

/// A closed interval `[lower, upper]` around a central value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    /// Symmetric interval `value ± z·sqrt(variance)`.
    ///
    /// Negative variance is treated as zero width.
    pub fn gaussian(value: f64, variance: f64, z: f64) -> Self {
        let half = half_width(variance, z);
        Self {
            value,
            lower: value - half,
            upper: value + half,
        }
    }

    /// Clamp all three endpoints into `[lo, hi]`.
    ///
    /// Clamping is monotone, so `lower <= value <= upper` survives it.
    pub fn clamped(self, lo: f64, hi: f64) -> Self {
        Self {
            value: clamp_to(self.value, lo, hi),
            lower: clamp_to(self.lower, lo, hi),
            upper: clamp_to(self.upper, lo, hi),
        }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// `z·sqrt(variance)`, with negative variance mapped to zero.
#[inline]
pub fn half_width(variance: f64, z: f64) -> f64 {
    if variance > 0.0 {
        z * variance.sqrt()
    } else if variance.is_nan() {
        f64::NAN
    } else {
        0.0
    }
}
