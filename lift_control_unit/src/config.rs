//! Configuration loading.
//!
//! TOML file → [`LiftConfig`] → cross-field validation. Every section
//! and field is optional; anything omitted takes its built-in default.

use std::path::Path;

use lift_common::config::LiftConfig;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// Load and validate a configuration file.
pub fn load_config(path: &Path) -> Result<LiftConfig, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let config: LiftConfig = toml::from_str(&text)?;
    config.validate().map_err(ConfigError::Validation)?;
    info!(path = %path.display(), "configuration loaded");
    Ok(config)
}

// ─── Tests ──────────────────────────────────────────────────────────
