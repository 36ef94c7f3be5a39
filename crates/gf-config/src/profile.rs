//! Per-user estimator parameters and CGM device presets.
//!
//! All quantities are in mmol/L and minutes. The numbers are empirical
//! defaults, not fitted to any user's data.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validate::{non_negative, positive, ValidationError, ValidationResult};

/// Tunable constants for one estimation run.
///
/// Missing fields in a JSON file fall back to [`ParameterProfile::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ParameterProfile {
    /// Personal fasting baseline the velocity is pulled towards (mmol/L).
    pub mean_target: f64,
    /// Sensor measurement variance (mmol/L)².
    pub measurement_noise: f64,
    /// Glucose process noise per minute.
    pub process_noise_glucose: f64,
    /// Velocity process noise per minute.
    pub process_noise_velocity: f64,
    /// Strength of the pull towards `mean_target`, per minute².
    pub reversion_rate: f64,
    /// Per-minute multiplicative decay of the velocity, in (0, 1].
    pub damping_factor: f64,
    /// Assumed delay between blood and interstitial glucose.
    pub sensor_lag_minutes: f64,
    /// Nominal spacing between sensor readings.
    pub sample_interval_minutes: f64,
}

impl Default for ParameterProfile {
    fn default() -> Self {
        Self {
            mean_target: 5.5,
            measurement_noise: 0.16,
            process_noise_glucose: 0.002,
            process_noise_velocity: 0.0001,
            reversion_rate: 0.0001,
            damping_factor: 0.98,
            sensor_lag_minutes: 10.0,
            sample_interval_minutes: 5.0,
        }
    }
}

impl ParameterProfile {
    /// Default profile with the device's sensor characteristics applied.
    pub fn for_device(device: DevicePreset) -> Self {
        Self::default().with_device(device)
    }

    /// Replace the sensor triple, keeping the physiological parameters.
    pub fn with_device(mut self, device: DevicePreset) -> Self {
        let sensor = device.sensor();
        self.measurement_noise = sensor.measurement_noise;
        self.sample_interval_minutes = sensor.sample_interval_minutes;
        self.sensor_lag_minutes = sensor.sensor_lag_minutes;
        self
    }

    pub fn with_mean_target(mut self, mean_target: f64) -> Self {
        self.mean_target = mean_target;
        self
    }

    pub fn validate(&self) -> ValidationResult {
        positive("profile", "mean_target", self.mean_target)?;
        non_negative("profile", "measurement_noise", self.measurement_noise)?;
        non_negative("profile", "process_noise_glucose", self.process_noise_glucose)?;
        non_negative("profile", "process_noise_velocity", self.process_noise_velocity)?;
        non_negative("profile", "reversion_rate", self.reversion_rate)?;
        non_negative("profile", "sensor_lag_minutes", self.sensor_lag_minutes)?;
        positive("profile", "sample_interval_minutes", self.sample_interval_minutes)?;
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(ValidationError::invalid(
                "profile",
                "damping_factor",
                format!("must be in (0, 1], got {}", self.damping_factor),
            ));
        }
        Ok(())
    }
}

/// Sensor characteristics that differ between CGM device classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorCharacteristics {
    pub measurement_noise: f64,
    pub sample_interval_minutes: f64,
    pub sensor_lag_minutes: f64,
}

/// Known CGM device classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DevicePreset {
    #[default]
    Generic,
    DexcomG6,
    DexcomG7,
    Libre2,
    Libre3,
}

impl DevicePreset {
    pub const ALL: [DevicePreset; 5] = [
        DevicePreset::Generic,
        DevicePreset::DexcomG6,
        DevicePreset::DexcomG7,
        DevicePreset::Libre2,
        DevicePreset::Libre3,
    ];

    pub fn sensor(self) -> SensorCharacteristics {
        let (measurement_noise, sample_interval_minutes, sensor_lag_minutes) = match self {
            DevicePreset::Generic => (0.16, 5.0, 10.0),
            DevicePreset::DexcomG6 => (0.20, 5.0, 10.0),
            DevicePreset::DexcomG7 => (0.15, 5.0, 8.0),
            DevicePreset::Libre2 => (0.25, 1.0, 12.0),
            DevicePreset::Libre3 => (0.18, 1.0, 10.0),
        };
        SensorCharacteristics {
            measurement_noise,
            sample_interval_minutes,
            sensor_lag_minutes,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DevicePreset::Generic => "generic",
            DevicePreset::DexcomG6 => "dexcom-g6",
            DevicePreset::DexcomG7 => "dexcom-g7",
            DevicePreset::Libre2 => "libre2",
            DevicePreset::Libre3 => "libre3",
        }
    }
}

impl fmt::Display for DevicePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DevicePreset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        DevicePreset::ALL
            .into_iter()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownDevice(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_valid() {
        ParameterProfile::default().validate().unwrap();
        for device in DevicePreset::ALL {
            ParameterProfile::for_device(device).validate().unwrap();
        }
    }

    #[test]
    fn generic_preset_matches_default() {
        assert_eq!(
            ParameterProfile::for_device(DevicePreset::Generic),
            ParameterProfile::default()
        );
    }

    #[test]
    fn with_device_keeps_physiology() {
        let profile = ParameterProfile::default()
            .with_mean_target(6.1)
            .with_device(DevicePreset::Libre2);
        assert_eq!(profile.mean_target, 6.1);
        assert_eq!(profile.sample_interval_minutes, 1.0);
        assert_eq!(profile.measurement_noise, 0.25);
        assert_eq!(profile.damping_factor, 0.98);
    }

    #[test]
    fn partial_json_merges_over_defaults() {
        let profile: ParameterProfile =
            serde_json::from_str(r#"{ "mean_target": 6.4, "damping_factor": 0.95 }"#).unwrap();
        assert_eq!(profile.mean_target, 6.4);
        assert_eq!(profile.damping_factor, 0.95);
        assert_eq!(profile.measurement_noise, 0.16);
    }

    #[test]
    fn damping_out_of_range_rejected() {
        let mut profile = ParameterProfile::default();
        profile.damping_factor = 1.2;
        assert!(profile.validate().is_err());
        profile.damping_factor = 0.0;
        assert!(profile.validate().is_err());
        profile.damping_factor = 1.0;
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn negative_noise_rejected() {
        let mut profile = ParameterProfile::default();
        profile.process_noise_velocity = -0.1;
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("process_noise_velocity"));
    }

    #[test]
    fn device_parse_is_forgiving() {
        assert_eq!("dexcom-g7".parse::<DevicePreset>().unwrap(), DevicePreset::DexcomG7);
        assert_eq!("Dexcom_G6".parse::<DevicePreset>().unwrap(), DevicePreset::DexcomG6);
        assert!("medtronic".parse::<DevicePreset>().is_err());
    }

    #[test]
    fn device_serde_uses_kebab_case() {
        let json = serde_json::to_string(&DevicePreset::DexcomG6).unwrap();
        assert_eq!(json, "\"dexcom-g6\"");
        for device in DevicePreset::ALL {
            let json = serde_json::to_string(&device).unwrap();
            assert_eq!(json, format!("\"{}\"", device));
        }
    }
}
