//! Top-level engine configuration file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::profile::ParameterProfile;
use crate::projection::ProjectionConfig;
use crate::risk::RiskThresholds;
use crate::validate::{ValidationError, ValidationResult};

/// What the forecaster does with readings that are non-finite or not positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Drop the reading, log a warning, keep going.
    #[default]
    Drop,
    /// Fail the whole forecast.
    Reject,
}

/// Everything a forecast run needs besides the readings.
///
/// Every section is optional in JSON; missing sections and fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub profile: ParameterProfile,
    pub projection: ProjectionConfig,
    pub risk: RiskThresholds,
    pub validation: ValidationPolicy,
}

impl EngineConfig {
    /// Load and validate from a JSON file.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse_json(&content)
    }

    /// Parse and validate from a JSON string.
    pub fn parse_json(json: &str) -> ValidationResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ValidationResult {
        self.profile.validate()?;
        self.projection.validate(&self.profile)?;
        self.risk.validate()
    }
}
