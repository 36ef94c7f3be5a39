//! One forecast run: readings in, report out.
//!
//! The [`Forecaster`] is the host-facing boundary around the estimation core.
//! It screens readings according to [`ValidationPolicy`], filters them,
//! projects ahead, truncates the projection adaptively, and classifies risk.
//! Each call owns its own estimator, so one `Forecaster` can serve any number
//! of independent runs.

use chrono::{DateTime, Utc};
use gf_common::{minutes_between, Error, Reading, Result, RunId, SCHEMA_VERSION};
use gf_config::{profile_fingerprint, EngineConfig, ValidationPolicy};
use serde::Serialize;
use tracing::{info, warn};

use crate::estimate::{SequenceProcessor, State};
use crate::project::{apply_adaptive_horizon, near_horizon_point, usable_horizon_minutes};
use crate::project::{ProjectionPoint, Projector};
use crate::risk::{classify, RiskAssessment, TrendArrow};

/// Data older than this many sample intervals is reported as stale.
pub const STALE_INTERVALS: f64 = 3.0;

/// How the input readings were used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReadingStats {
    pub received: usize,
    /// Rejected by boundary validation (non-finite or not positive).
    pub dropped: usize,
    pub accepted: usize,
    /// Duplicate or out-of-order timestamps.
    pub skipped: usize,
    pub resets: usize,
}

/// Everything a host needs to render or alert on one run.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub schema_version: String,
    pub run_id: RunId,
    pub generated_at: DateTime<Utc>,
    pub profile_hash: String,
    pub state: State,
    pub trend: TrendArrow,
    pub risk: RiskAssessment,
    /// Projected value handed to the risk classifier.
    pub projected_near: f64,
    /// Projection after the adaptive horizon cut.
    pub projection: Vec<ProjectionPoint>,
    pub usable_horizon_minutes: Option<f64>,
    pub minutes_to_low: Option<f64>,
    pub minutes_to_high: Option<f64>,
    pub last_reading_at: Option<DateTime<Utc>>,
    pub data_age_minutes: Option<f64>,
    pub stale: bool,
    /// Carried through for display; the filter does not compensate for it.
    pub sensor_lag_minutes: f64,
    pub readings: ReadingStats,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Forecaster {
    config: EngineConfig,
}

impl Forecaster {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline over `readings` as seen at `now`.
    ///
    /// Fails only when the policy is [`ValidationPolicy::Reject`] and a
    /// reading is not finite and positive.
    pub fn forecast(&self, readings: &[Reading], now: DateTime<Utc>) -> Result<ForecastReport> {
        let profile = self.config.profile;
        let (usable, dropped) = self.screen(readings)?;

        let outcome = SequenceProcessor::new(profile).run(&usable);
        let state = outcome.state;
        let origin = outcome.last_timestamp.unwrap_or(now);

        let projection_config = &self.config.projection;
        let full = Projector::new(profile, projection_config).project(&state, origin);
        let projected_near = near_horizon_point(&full, projection_config.near_horizon_minutes)
            .map_or(state.glucose, |p| p.value);
        let projection = apply_adaptive_horizon(&full, projection_config.max_band_width);

        let thresholds = &self.config.risk;
        let risk = classify(state.glucose, state.velocity, projected_near, thresholds);
        let minutes_to_low = first_offset(&projection, |v| v < thresholds.low);
        let minutes_to_high = first_offset(&projection, |v| v > thresholds.high);

        let raw_age = outcome.last_timestamp.map(|t| minutes_between(t, now));
        if let Some(age) = raw_age.filter(|age| *age < 0.0) {
            warn!(
                target: "forecast.run",
                ahead_minutes = -age,
                "Latest reading is timestamped after now"
            );
        }
        let data_age_minutes = raw_age.map(|age| age.max(0.0));
        let stale = data_age_minutes
            .map_or(true, |age| age > STALE_INTERVALS * profile.sample_interval_minutes);
        if stale && outcome.last_timestamp.is_some() {
            warn!(
                target: "forecast.run",
                data_age_minutes = data_age_minutes.unwrap_or_default(),
                "Latest reading is stale"
            );
        }

        let report = ForecastReport {
            schema_version: SCHEMA_VERSION.to_string(),
            run_id: RunId::new(),
            generated_at: now,
            profile_hash: profile_fingerprint(&profile),
            state,
            trend: TrendArrow::from_velocity(state.velocity),
            risk,
            projected_near,
            usable_horizon_minutes: usable_horizon_minutes(&projection),
            projection,
            minutes_to_low,
            minutes_to_high,
            last_reading_at: outcome.last_timestamp,
            data_age_minutes,
            stale,
            sensor_lag_minutes: profile.sensor_lag_minutes,
            readings: ReadingStats {
                received: readings.len(),
                dropped,
                accepted: outcome.accepted,
                skipped: outcome.skipped,
                resets: outcome.resets,
            },
        };

        info!(
            target: "forecast.run",
            run_id = %report.run_id,
            level = %report.risk.level,
            glucose = report.state.glucose,
            velocity = report.state.velocity,
            points = report.projection.len(),
            "Forecast complete"
        );
        Ok(report)
    }

    fn screen(&self, readings: &[Reading]) -> Result<(Vec<Reading>, usize)> {
        let mut usable = Vec::with_capacity(readings.len());
        let mut dropped = 0;
        for (index, reading) in readings.iter().enumerate() {
            if reading.is_plausible() {
                usable.push(*reading);
                continue;
            }
            match self.config.validation {
                ValidationPolicy::Reject => {
                    return Err(Error::InvalidReading {
                        index,
                        value: reading.value,
                    });
                }
                ValidationPolicy::Drop => {
                    warn!(
                        target: "forecast.run",
                        index,
                        value = reading.value,
                        "Dropping implausible reading"
                    );
                    dropped += 1;
                }
            }
        }
        Ok((usable, dropped))
    }
}

fn first_offset(points: &[ProjectionPoint], crossed: impl Fn(f64) -> bool) -> Option<f64> {
    points
        .iter()
        .find(|p| crossed(p.value))
        .map(|p| p.offset_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskLevel;
    use chrono::{Duration, TimeZone};

    fn t(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn steady(n: i64, value: f64) -> Vec<Reading> {
        (0..n).map(|i| Reading::new(t(i * 5), value)).collect()
    }

    #[test]
    fn steady_series_is_safe_and_fresh() {
        let readings = steady(12, 6.0);
        let report = Forecaster::default().forecast(&readings, t(57)).unwrap();
        assert_eq!(report.risk.level, RiskLevel::Safe);
        assert_eq!(report.trend, TrendArrow::Flat);
        assert!(!report.stale);
        assert_eq!(report.data_age_minutes, Some(2.0));
        assert_eq!(report.readings.accepted, 12);
        assert_eq!(report.minutes_to_low, None);
        assert_eq!(report.minutes_to_high, None);
        assert_eq!(report.projection[0].offset_time, t(55));
        assert!(gf_common::schema::is_compatible(&report.schema_version));
    }

    #[test]
    fn empty_input_is_neutral_and_stale() {
        let report = Forecaster::default().forecast(&[], t(0)).unwrap();
        assert_eq!(report.state.glucose, 5.5);
        assert!(report.stale);
        assert_eq!(report.data_age_minutes, None);
        assert_eq!(report.projection[0].offset_time, t(0));
        assert_eq!(report.risk.level, RiskLevel::Safe);
    }

    #[test]
    fn old_data_is_stale() {
        let readings = steady(4, 6.0);
        let report = Forecaster::default().forecast(&readings, t(60)).unwrap();
        assert!(report.stale);
        assert_eq!(report.data_age_minutes, Some(45.0));
    }

    #[test]
    fn future_dated_readings_have_zero_age() {
        let readings = steady(6, 6.0);
        let report = Forecaster::default().forecast(&readings, t(10)).unwrap();
        assert_eq!(report.data_age_minutes, Some(0.0));
        assert!(!report.stale);
        assert_eq!(report.last_reading_at, Some(t(25)));
    }

    #[test]
    fn oversized_horizon_does_not_panic() {
        let mut config = EngineConfig::default();
        config.projection.horizon_minutes = 1e12;
        config.projection.step_minutes = Some(1e9);
        let report = Forecaster::new(config)
            .forecast(&[Reading::new(t(0), 6.0)], t(1))
            .unwrap();
        assert_eq!(report.projection[0].offset_time, t(0));
    }

    #[test]
    fn drop_policy_discards_bad_readings() {
        let mut readings = steady(6, 6.0);
        readings[2].value = f64::NAN;
        readings[4].value = -1.0;
        let report = Forecaster::default().forecast(&readings, t(25)).unwrap();
        assert_eq!(report.readings.received, 6);
        assert_eq!(report.readings.dropped, 2);
        assert_eq!(report.readings.accepted, 4);
        assert!(report.state.glucose.is_finite());
    }

    #[test]
    fn reject_policy_fails_with_index() {
        let mut readings = steady(6, 6.0);
        readings[3].value = 0.0;
        let config = EngineConfig {
            validation: ValidationPolicy::Reject,
            ..EngineConfig::default()
        };
        let err = Forecaster::new(config).forecast(&readings, t(25)).unwrap_err();
        assert!(matches!(err, Error::InvalidReading { index: 3, .. }));
    }

    #[test]
    fn low_reading_reports_time_to_low_zero() {
        let readings = steady(8, 3.5);
        let report = Forecaster::default().forecast(&readings, t(36)).unwrap();
        assert_eq!(report.minutes_to_low, Some(0.0));
        assert!(report.risk.level >= RiskLevel::Warning);
    }

    #[test]
    fn projection_is_truncated_by_band_width() {
        let readings = steady(12, 6.0);
        let report = Forecaster::default().forecast(&readings, t(55)).unwrap();
        assert!(!report.projection.is_empty());
        assert!(report.projection.len() < 25);
        for p in &report.projection {
            assert!(p.width() <= 4.0);
        }
        assert_eq!(
            report.usable_horizon_minutes,
            report.projection.last().map(|p| p.offset_minutes)
        );
    }

    #[test]
    fn report_serializes_with_identity() {
        let report = Forecaster::default().forecast(&steady(3, 6.0), t(10)).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["schema_version"], SCHEMA_VERSION);
        assert!(json["run_id"].as_str().unwrap().starts_with("run-"));
        assert_eq!(json["profile_hash"].as_str().unwrap().len(), 64);
        assert_eq!(json["risk"]["level"], "safe");
        assert_eq!(json["trend"], "flat");
    }
}
