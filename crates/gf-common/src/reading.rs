//! Timestamped glucose readings and unit handling.
//!
//! The engine works in mmol/L only. Readings in mg/dL are converted once at
//! the boundary with [`Reading::from_unit`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// mg/dL per mmol/L for glucose (molar mass 180.16 g/mol).
pub const MGDL_PER_MMOL: f64 = 18.0182;

/// A single sensor reading in the canonical unit (mmol/L).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Reading {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Build a reading from a value expressed in `unit`.
    pub fn from_unit(timestamp: DateTime<Utc>, value: f64, unit: GlucoseUnit) -> Self {
        Self {
            timestamp,
            value: unit.to_mmol(value),
        }
    }

    /// Positive and finite; the only values the forecaster accepts by default.
    pub fn is_plausible(&self) -> bool {
        self.value.is_finite() && self.value > 0.0
    }
}

/// Unit a reading was reported in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum GlucoseUnit {
    #[default]
    #[value(name = "mmol")]
    MmolPerL,
    #[value(name = "mgdl")]
    MgPerDl,
}

impl GlucoseUnit {
    pub fn to_mmol(self, value: f64) -> f64 {
        match self {
            GlucoseUnit::MmolPerL => value,
            GlucoseUnit::MgPerDl => value / MGDL_PER_MMOL,
        }
    }

    pub fn from_mmol(self, value: f64) -> f64 {
        match self {
            GlucoseUnit::MmolPerL => value,
            GlucoseUnit::MgPerDl => value * MGDL_PER_MMOL,
        }
    }
}

impl fmt::Display for GlucoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlucoseUnit::MmolPerL => write!(f, "mmol/L"),
            GlucoseUnit::MgPerDl => write!(f, "mg/dL"),
        }
    }
}

/// Signed minutes from `earlier` to `later`, with millisecond resolution.
pub fn minutes_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64 / 60_000.0
}
