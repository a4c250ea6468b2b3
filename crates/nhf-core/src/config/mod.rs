//! Configuration resolution for nhf.
//!
//! This module handles:
//! - Locating model.json (CLI > env > XDG > defaults)
//! - Schema version and semantic validation via nhf-config
//! - Locating the data directory (CLI > env > ./data)
//! - Config snapshots for `nhf config show`

pub use nhf_config::validate::ValidationError;
pub use nhf_config::ModelConfig;

use nhf_config::validate::validate_model;
use nhf_config::CONFIG_SCHEMA_VERSION;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default XDG config directory name.
const CONFIG_DIR_NAME: &str = "no_hitter_forecaster";

/// Model file name inside a config directory.
pub const MODEL_FILE_NAME: &str = "model.json";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "NHF_CONFIG_DIR";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "NHF_DATA_DIR";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid JSON in config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Semantic validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ConfigError {
    /// Stable error code for structured output.
    pub fn code(&self) -> u32 {
        match self {
            ConfigError::NotFound { .. } => 10,
            ConfigError::ParseError { .. } => 11,
            ConfigError::ValidationError(_) => 12,
            ConfigError::IoError { .. } => 60,
            ConfigError::VersionMismatch { .. } => 13,
        }
    }
}

/// Resolved configuration with provenance information.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub model: ModelConfig,
    /// Path to the model file (None if using defaults).
    pub model_path: Option<PathBuf>,
    /// SHA-256 of the model file content (None if using defaults).
    pub model_hash: Option<String>,
    /// The config directory used for resolution.
    pub config_dir: PathBuf,
}

impl ResolvedConfig {
    /// Built-in defaults, no file involved.
    pub fn defaults(config_dir: PathBuf) -> Self {
        Self {
            model: ModelConfig::default(),
            model_path: None,
            model_hash: None,
            config_dir,
        }
    }

    pub fn using_defaults(&self) -> bool {
        self.model_path.is_none()
    }

    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            model_path: self.model_path.clone(),
            model_hash: self.model_hash.clone(),
            model_schema_version: self.model.schema_version.clone(),
            config_dir: self.config_dir.clone(),
            using_defaults: self.using_defaults(),
        }
    }
}

/// Config provenance for reports.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConfigSnapshot {
    pub model_path: Option<PathBuf>,
    pub model_hash: Option<String>,
    pub model_schema_version: String,
    pub config_dir: PathBuf,
    pub using_defaults: bool,
}

/// Configuration resolution options.
#[derive(Debug, Default, Clone)]
pub struct ConfigOptions {
    /// Explicit model file (highest priority).
    pub model_path: Option<PathBuf>,
    /// Explicit config directory.
    pub config_dir: Option<PathBuf>,
}

/// Load configuration with the standard resolution order.
///
/// Resolution order (highest to lowest priority):
/// 1. Explicit model file (`--config`)
/// 2. Explicit config directory or `NHF_CONFIG_DIR`
/// 3. XDG config home (~/.config/no_hitter_forecaster/)
/// 4. Built-in defaults
///
/// An explicit model file that does not exist is an error; a missing
/// model.json in a config directory falls back to the defaults.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    let config_dir = resolve_config_dir(options);

    if let Some(path) = &options.model_path {
        if !path.exists() {
            return Err(ConfigError::NotFound { path: path.clone() });
        }
        return load_from_file(path, config_dir);
    }

    let default_path = config_dir.join(MODEL_FILE_NAME);
    if default_path.exists() {
        return load_from_file(&default_path, config_dir);
    }

    Ok(ResolvedConfig::defaults(config_dir))
}

fn load_from_file(path: &Path, config_dir: PathBuf) -> Result<ResolvedConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let hash = compute_hash(&content);

    let model: ModelConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

    if model.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(ConfigError::VersionMismatch {
            expected: CONFIG_SCHEMA_VERSION.to_string(),
            actual: model.schema_version.clone(),
        });
    }

    validate_model(&model)?;

    Ok(ResolvedConfig {
        model,
        model_path: Some(path.to_path_buf()),
        model_hash: Some(hash),
        config_dir,
    })
}

/// Resolve the config directory using the standard resolution order.
pub fn resolve_config_dir(options: &ConfigOptions) -> PathBuf {
    if let Some(dir) = &options.config_dir {
        return dir.clone();
    }

    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    let xdg_config = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::config_dir().unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".config")
            })
        });

    xdg_config.join(CONFIG_DIR_NAME)
}

/// Resolve the data directory: explicit flag, then `NHF_DATA_DIR`, then `./data`.
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("data"),
    }
}

/// SHA-256 of content, hex encoded.
pub fn compute_hash(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    hex::encode(digest)
}
