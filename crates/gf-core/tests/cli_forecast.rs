//! CLI E2E tests for forecast, classify and profile commands.
//!
//! Validates:
//! - JSON reports carry identity fields and a compatible schema version
//! - Exit codes encode the risk level (0-3) and error classes (10+)
//! - mg/dL input is converted before filtering
//! - Config resolution errors and bad device presets exit 10
//! - Missing or malformed readings files exit 13 / 11

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use chrono::{DateTime, Duration, TimeZone, Utc};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

// ============================================================================
// Helpers
// ============================================================================

/// gf-core with config discovery pointed at an empty directory.
fn gf_core(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("gf-core");
    cmd.timeout(std::time::Duration::from_secs(60))
        .env_remove("GF_CONFIG")
        .env_remove("GF_LOG")
        .env("XDG_CONFIG_HOME", home)
        .env("HOME", home);
    cmd
}

fn t(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes)
}

fn readings_json(values: &[f64]) -> String {
    let items: Vec<Value> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            serde_json::json!({
                "timestamp": t(5 * i as i64).to_rfc3339(),
                "value": v,
            })
        })
        .collect();
    serde_json::to_string(&items).unwrap()
}

fn write_file(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).expect("write file");
    path
}

fn stdout_json(cmd: &mut Command, code: i32) -> Value {
    let output = cmd.assert().code(code).get_output().stdout.clone();
    serde_json::from_slice(&output).expect("parse JSON")
}

// ============================================================================
// Forecast
// ============================================================================

#[test]
fn forecast_steady_series_is_safe() {
    let dir = tempdir().expect("tempdir");
    let readings = write_file(&dir, "r.json", &readings_json(&[6.0; 12]));

    let json = stdout_json(
        gf_core(dir.path()).args([
            "forecast",
            "--readings",
            readings.to_str().unwrap(),
            "--now",
            &t(57).to_rfc3339(),
        ]),
        0,
    );

    assert!(gf_common::schema::is_compatible(
        json["schema_version"].as_str().expect("schema_version")
    ));
    assert!(json["run_id"].as_str().unwrap().starts_with("run-"));
    assert_eq!(json["profile_hash"].as_str().unwrap().len(), 64);
    assert_eq!(json["risk"]["level"], "safe");
    assert_eq!(json["trend"], "flat");
    assert_eq!(json["stale"], false);
    assert_eq!(json["readings"]["accepted"], 12);
    let projection = json["projection"].as_array().expect("projection array");
    assert!(!projection.is_empty());
    for point in projection {
        let width = point["upper"].as_f64().unwrap() - point["lower"].as_f64().unwrap();
        assert!(width <= 4.0, "width {width} survived the horizon cut");
    }
}

#[test]
fn forecast_falling_into_severe_low_exits_urgent() {
    let dir = tempdir().expect("tempdir");
    let values: Vec<f64> = (0..12).map(|i| 6.5 - 0.3 * i as f64).collect();
    let readings = write_file(&dir, "r.json", &readings_json(&values));

    let json = stdout_json(
        gf_core(dir.path()).args([
            "forecast",
            "--readings",
            readings.to_str().unwrap(),
            "--now",
            &t(56).to_rfc3339(),
        ]),
        3,
    );
    assert_eq!(json["risk"]["level"], "urgent");
    assert_eq!(json["risk"]["message"], "Severe low risk");
    assert_eq!(json["minutes_to_low"], 0.0);
}

#[test]
fn forecast_accepts_mgdl() {
    let dir = tempdir().expect("tempdir");
    let readings = write_file(&dir, "r.json", &readings_json(&[110.0; 8]));

    let json = stdout_json(
        gf_core(dir.path()).args([
            "forecast",
            "--readings",
            readings.to_str().unwrap(),
            "--unit",
            "mgdl",
            "--now",
            &t(36).to_rfc3339(),
        ]),
        0,
    );
    let glucose = json["state"]["glucose"].as_f64().unwrap();
    assert!((glucose - 110.0 / 18.0182).abs() < 0.05, "glucose {glucose}");
}

#[test]
fn forecast_reads_stdin() {
    let dir = tempdir().expect("tempdir");
    gf_core(dir.path())
        .args(["forecast", "--readings", "-", "--now", &t(26).to_rfc3339()])
        .write_stdin(readings_json(&[6.0; 6]))
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"schema_version\""));
}

#[test]
fn forecast_summary_format() {
    let dir = tempdir().expect("tempdir");
    let readings = write_file(&dir, "r.json", &readings_json(&[6.0; 6]));
    gf_core(dir.path())
        .args([
            "--format",
            "summary",
            "forecast",
            "--readings",
            readings.to_str().unwrap(),
            "--now",
            &t(26).to_rfc3339(),
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("[safe] 6.0 mmol/L"))
        .stdout(predicate::str::contains("Projection:"));
}

#[test]
fn forecast_drops_null_values_by_default() {
    let dir = tempdir().expect("tempdir");
    let body = format!(
        r#"[{{"timestamp":"{}","value":6.0}},{{"timestamp":"{}","value":null}},{{"timestamp":"{}","value":6.1}}]"#,
        t(0).to_rfc3339(),
        t(5).to_rfc3339(),
        t(10).to_rfc3339()
    );
    let readings = write_file(&dir, "r.json", &body);
    let json = stdout_json(
        gf_core(dir.path()).args([
            "forecast",
            "--readings",
            readings.to_str().unwrap(),
            "--now",
            &t(11).to_rfc3339(),
        ]),
        0,
    );
    assert_eq!(json["readings"]["dropped"], 1);
    assert_eq!(json["readings"]["accepted"], 2);
}

#[test]
fn forecast_reject_policy_exits_input_error() {
    let dir = tempdir().expect("tempdir");
    let config = write_file(&dir, "engine.json", r#"{ "validation": "reject" }"#);
    let readings = write_file(&dir, "r.json", &readings_json(&[6.0, -2.0, 6.1]));

    let json = stdout_json(
        gf_core(dir.path()).args([
            "--config",
            config.to_str().unwrap(),
            "forecast",
            "--readings",
            readings.to_str().unwrap(),
        ]),
        11,
    );
    assert_eq!(json["error"]["code"], 20);
}

// ============================================================================
// Error paths
// ============================================================================

#[test]
fn missing_readings_file_is_io_error() {
    let dir = tempdir().expect("tempdir");
    gf_core(dir.path())
        .args(["forecast", "--readings", "/nonexistent/readings.json"])
        .assert()
        .code(13)
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn malformed_readings_is_input_error() {
    let dir = tempdir().expect("tempdir");
    let readings = write_file(&dir, "r.json", "{ not json");
    gf_core(dir.path())
        .args(["forecast", "--readings", readings.to_str().unwrap()])
        .assert()
        .code(11);
}

#[test]
fn bad_now_is_input_error() {
    let dir = tempdir().expect("tempdir");
    let readings = write_file(&dir, "r.json", &readings_json(&[6.0]));
    gf_core(dir.path())
        .args([
            "forecast",
            "--readings",
            readings.to_str().unwrap(),
            "--now",
            "yesterday",
        ])
        .assert()
        .code(11)
        .stderr(predicate::str::contains("invalid timestamp"));
}

#[test]
fn invalid_config_exits_config_error() {
    let dir = tempdir().expect("tempdir");
    let config = write_file(&dir, "engine.json", r#"{ "profile": { "damping_factor": 1.5 } }"#);
    gf_core(dir.path())
        .args(["--config", config.to_str().unwrap(), "profile", "show"])
        .assert()
        .code(10)
        .stderr(predicate::str::contains("damping_factor"));
}

#[test]
fn env_config_is_used_when_no_flag() {
    let dir = tempdir().expect("tempdir");
    let config = write_file(&dir, "env.json", r#"{ "profile": { "mean_target": 6.6 } }"#);
    let json = stdout_json(
        gf_core(dir.path())
            .env("GF_CONFIG", &config)
            .args(["profile", "show"]),
        0,
    );
    assert_eq!(json["source"]["kind"], "env");
    assert_eq!(json["config"]["profile"]["mean_target"], 6.6);
}

#[test]
fn unknown_device_exits_config_error() {
    let dir = tempdir().expect("tempdir");
    gf_core(dir.path())
        .args(["profile", "show", "--device", "medtronic"])
        .assert()
        .code(10)
        .stderr(predicate::str::contains("medtronic"));
}

#[test]
fn unknown_flag_exits_input_error() {
    let dir = tempdir().expect("tempdir");
    gf_core(dir.path()).args(["forecast", "--bogus"]).assert().code(11);
}

#[test]
fn help_exits_zero() {
    let dir = tempdir().expect("tempdir");
    gf_core(dir.path())
        .arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("forecast"));
}

// ============================================================================
// Classify
// ============================================================================

#[test]
fn classify_scenarios_map_to_exit_codes() {
    let dir = tempdir().expect("tempdir");

    let json = stdout_json(
        gf_core(dir.path()).args([
            "classify",
            "--current",
            "6.0",
            "--velocity",
            "1.2",
            "--projected",
            "6.5",
        ]),
        1,
    );
    assert_eq!(json["risk"]["message"], "Rising fast");
    assert_eq!(json["command"], "classify");

    let json = stdout_json(
        gf_core(dir.path()).args([
            "classify",
            "--current",
            "7.0",
            "--velocity",
            "0",
            "--projected",
            "2.5",
        ]),
        3,
    );
    assert_eq!(json["risk"]["level"], "urgent");

    gf_core(dir.path())
        .args([
            "--format",
            "summary",
            "classify",
            "--current",
            "3.5",
            "--velocity",
            "0.05",
            "--projected",
            "4.2",
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Recovering ↑"));
}

#[test]
fn classify_accepts_negative_velocity() {
    let dir = tempdir().expect("tempdir");
    let json = stdout_json(
        gf_core(dir.path()).args([
            "classify",
            "--current",
            "9.5",
            "--velocity",
            "-0.03",
            "--projected",
            "9.2",
        ]),
        1,
    );
    assert_eq!(json["risk"]["message"], "Falling fast");
}

// ============================================================================
// Profile
// ============================================================================

#[test]
fn profile_show_applies_device_preset() {
    let dir = tempdir().expect("tempdir");
    let json = stdout_json(
        gf_core(dir.path()).args(["profile", "show", "--device", "libre2"]),
        0,
    );
    assert_eq!(json["device"], "libre2");
    assert_eq!(json["source"]["kind"], "defaults");
    assert_eq!(json["config"]["profile"]["sample_interval_minutes"], 1.0);
    assert_eq!(json["profile_hash"].as_str().unwrap().len(), 64);
}

#[test]
fn profile_schema_describes_fields() {
    let dir = tempdir().expect("tempdir");
    let json = stdout_json(gf_core(dir.path()).args(["profile", "schema"]), 0);
    let properties = json["properties"].as_object().expect("properties");
    assert!(properties.contains_key("mean_target"));
    assert!(properties.contains_key("damping_factor"));
}
