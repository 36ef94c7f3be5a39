//! Glucose forecast configuration loading and validation.
//!
//! This crate provides:
//! - The per-user [`ParameterProfile`] and CGM device presets
//! - Projection and risk threshold settings
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation
//! - Config snapshots (profile fingerprints) for forecast reports

pub mod engine;
pub mod profile;
pub mod projection;
pub mod resolve;
pub mod risk;
pub mod snapshot;
pub mod validate;

pub use engine::{EngineConfig, ValidationPolicy};
pub use profile::{DevicePreset, ParameterProfile};
pub use projection::{ProjectionConfig, MAX_HORIZON_MINUTES, MAX_PROJECTION_POINTS};
pub use resolve::{resolve_config, ConfigPaths, ConfigSource, ResolvedConfig};
pub use risk::RiskThresholds;
pub use snapshot::{profile_fingerprint, ConfigSnapshot};
pub use validate::{ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
