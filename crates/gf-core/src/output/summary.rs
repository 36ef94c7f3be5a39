//! Short human-readable renderings.
//!
//! Values are shown in the unit the readings came in; JSON output always
//! stays in mmol/L.

use gf_common::GlucoseUnit;
use gf_config::ConfigSnapshot;

use crate::forecast::ForecastReport;
use crate::risk::{RiskAssessment, TrendArrow};

fn value(v: f64, unit: GlucoseUnit) -> String {
    match unit {
        GlucoseUnit::MmolPerL => format!("{:.1}", unit.from_mmol(v)),
        GlucoseUnit::MgPerDl => format!("{:.0}", unit.from_mmol(v)),
    }
}

fn minutes(m: Option<f64>) -> String {
    m.map(|m| format!("{:.0} min", m))
        .unwrap_or_else(|| "-".to_string())
}

/// One headline plus a few indented detail lines.
pub fn render_forecast(report: &ForecastReport, unit: GlucoseUnit) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "[{}] {} {} {}  {}",
        report.risk.level,
        value(report.state.glucose, unit),
        unit,
        report.trend.symbol(),
        report.risk.message,
    ));
    lines.push(format!(
        "  velocity: {:+.3} {}/min · trend: {}",
        unit.from_mmol(report.state.velocity),
        unit,
        report.trend,
    ));
    lines.push(format!(
        "  projected (near): {} · usable horizon: {}",
        value(report.projected_near, unit),
        minutes(report.usable_horizon_minutes),
    ));
    lines.push(format!(
        "  to low: {} · to high: {}",
        minutes(report.minutes_to_low),
        minutes(report.minutes_to_high),
    ));

    if !report.projection.is_empty() {
        lines.push(String::new());
        lines.push("  Projection:".to_string());
        for p in &report.projection {
            lines.push(format!(
                "    +{:>5.0} min  {:>5}  [{} – {}]",
                p.offset_minutes,
                value(p.value, unit),
                value(p.lower, unit),
                value(p.upper, unit),
            ));
        }
    }

    lines.push(String::new());
    let age = report
        .data_age_minutes
        .map(|a| format!("{:.0} min ago", a))
        .unwrap_or_else(|| "no data".to_string());
    lines.push(format!(
        "  last reading: {}{} · sensor lag ~{:.0} min",
        age,
        if report.stale { " (stale)" } else { "" },
        report.sensor_lag_minutes,
    ));
    let stats = &report.readings;
    lines.push(format!(
        "  readings: {} received, {} dropped, {} used, {} skipped, {} resets",
        stats.received, stats.dropped, stats.accepted, stats.skipped, stats.resets,
    ));
    lines.push(format!("  run: {}", report.run_id));

    lines.join("\n")
}

pub fn render_assessment(assessment: &RiskAssessment, velocity: f64) -> String {
    let arrow = TrendArrow::from_velocity(velocity);
    format!(
        "[{}] {} {}",
        assessment.level,
        assessment.message,
        arrow.symbol()
    )
}

pub fn render_snapshot(snapshot: &ConfigSnapshot) -> String {
    let p = &snapshot.config.profile;
    let mut lines = vec![format!(
        "# Profile ({})",
        snapshot
            .device
            .map(|d| d.to_string())
            .unwrap_or_else(|| "custom".to_string())
    )];
    lines.push(format!("  source: {}", snapshot.source));
    lines.push(format!("  mean_target: {}", p.mean_target));
    lines.push(format!("  measurement_noise: {}", p.measurement_noise));
    lines.push(format!(
        "  process_noise: glucose={} velocity={}",
        p.process_noise_glucose, p.process_noise_velocity
    ));
    lines.push(format!(
        "  reversion_rate: {} · damping_factor: {}",
        p.reversion_rate, p.damping_factor
    ));
    lines.push(format!(
        "  sample_interval: {} min · sensor_lag: {} min",
        p.sample_interval_minutes, p.sensor_lag_minutes
    ));
    lines.push(format!("  hash: {}", snapshot.profile_hash));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::Forecaster;
    use crate::risk::classify_default;
    use chrono::{Duration, TimeZone, Utc};
    use gf_common::Reading;
    use gf_config::{ConfigSource, EngineConfig};

    fn report() -> ForecastReport {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let readings: Vec<Reading> = (0..6)
            .map(|i| Reading::new(start + Duration::minutes(i * 5), 6.0))
            .collect();
        Forecaster::default()
            .forecast(&readings, start + Duration::minutes(26))
            .unwrap()
    }

    #[test]
    fn forecast_headline_in_mmol() {
        let text = render_forecast(&report(), GlucoseUnit::MmolPerL);
        let headline = text.lines().next().unwrap();
        assert!(headline.starts_with("[safe] 6.0 mmol/L"), "{headline}");
        assert!(headline.contains("Stable"));
        assert!(text.contains("Projection:"));
        assert!(text.contains("1 min ago"));
    }

    #[test]
    fn forecast_headline_in_mgdl() {
        let text = render_forecast(&report(), GlucoseUnit::MgPerDl);
        assert!(text.starts_with("[safe] 108 mg/dL"), "{text}");
    }

    #[test]
    fn assessment_line() {
        let line = render_assessment(&classify_default(6.0, 1.2, 6.5), 1.2);
        assert_eq!(line, "[watch] Rising fast ⇈");
    }

    #[test]
    fn snapshot_lists_hash() {
        let snapshot =
            ConfigSnapshot::capture(&EngineConfig::default(), ConfigSource::Defaults, None);
        let text = render_snapshot(&snapshot);
        assert!(text.starts_with("# Profile (custom)"));
        assert!(text.contains(&snapshot.profile_hash));
    }
}
