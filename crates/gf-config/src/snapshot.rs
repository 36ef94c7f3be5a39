//! Config snapshots attached to forecast reports.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::engine::EngineConfig;
use crate::profile::{DevicePreset, ParameterProfile};
use crate::resolve::ConfigSource;

/// The effective configuration of one run, with a stable fingerprint.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSnapshot {
    pub schema_version: String,
    pub source: ConfigSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<DevicePreset>,
    pub profile_hash: String,
    pub config: EngineConfig,
}

impl ConfigSnapshot {
    pub fn capture(
        config: &EngineConfig,
        source: ConfigSource,
        device: Option<DevicePreset>,
    ) -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            source,
            device,
            profile_hash: profile_fingerprint(&config.profile),
            config: *config,
        }
    }
}

/// SHA-256 hex digest of the profile's JSON form.
///
/// Field order is fixed by the struct definition, so equal profiles hash equally.
pub fn profile_fingerprint(profile: &ParameterProfile) -> String {
    let bytes = serde_json::to_vec(profile).unwrap_or_default();
    sha256_hex(&bytes)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
