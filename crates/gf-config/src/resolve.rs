//! Config resolution: CLI flag → environment → XDG config dir → defaults.
//!
//! An explicitly named file (flag or env) must exist. The XDG location is
//! optional and silently skipped when absent.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::engine::EngineConfig;
use crate::validate::ValidationResult;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "GF_CONFIG";
/// Directory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "glucose-forecast";
/// File name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "engine.json";

/// Candidate config locations, highest priority first.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub explicit: Option<PathBuf>,
    pub env: Option<PathBuf>,
    pub xdg: Option<PathBuf>,
}

impl ConfigPaths {
    /// Fill env and XDG candidates from the running process.
    pub fn discover(explicit: Option<PathBuf>) -> Self {
        let env = std::env::var_os(CONFIG_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let xdg = dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
        Self { explicit, env, xdg }
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum ConfigSource {
    Flag(PathBuf),
    Env(PathBuf),
    Xdg(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Flag(p) => write!(f, "flag:{}", p.display()),
            ConfigSource::Env(p) => write!(f, "env:{}", p.display()),
            ConfigSource::Xdg(p) => write!(f, "xdg:{}", p.display()),
            ConfigSource::Defaults => write!(f, "defaults"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: EngineConfig,
    pub source: ConfigSource,
}

/// Resolve the effective engine configuration.
pub fn resolve_config(paths: &ConfigPaths) -> ValidationResult<ResolvedConfig> {
    let (config, source) = if let Some(path) = &paths.explicit {
        (load(path)?, ConfigSource::Flag(path.clone()))
    } else if let Some(path) = &paths.env {
        (load(path)?, ConfigSource::Env(path.clone()))
    } else {
        match paths.xdg.as_deref().filter(|p| p.is_file()) {
            Some(path) => (load(path)?, ConfigSource::Xdg(path.to_path_buf())),
            None => (EngineConfig::default(), ConfigSource::Defaults),
        }
    };
    debug!(
        target: "config.resolve",
        source = %source,
        mean_target = config.profile.mean_target,
        "Resolved engine config"
    );
    Ok(ResolvedConfig { config, source })
}

fn load(path: &Path) -> ValidationResult<EngineConfig> {
    EngineConfig::from_file(path)
}
