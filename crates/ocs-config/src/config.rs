//! Configuration types and loading for the ocs tool.
//!
//! The main entry point is [`OcsConfig`], which represents the contents of
//! `.ocs/config.yaml`. Configuration is loaded with [`load_config`] and
//! saved with [`save_config`].

use ocs_core::game::GameRules;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration file contained invalid YAML.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// The `.ocs/` directory was not found.
    #[error("no .ocs directory found (create one with 'ocs config init')")]
    OcsDirNotFound,

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The configuration file name inside `.ocs/`.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Which sections of a game report are printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Print every intermediate state of a goal, not only its result.
    #[serde(default = "default_true")]
    pub trace: bool,

    /// Print per-symbol accepted/rejected counts.
    #[serde(default = "default_true")]
    pub stats: bool,

    /// Print the glyph legend with attribute vectors.
    #[serde(default = "default_true")]
    pub legend: bool,

    /// Print each goal as an infix expression tree as well.
    #[serde(default)]
    pub tree: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            trace: true,
            stats: true,
            legend: true,
            tree: false,
        }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full ocs configuration, corresponding to `.ocs/config.yaml`.
///
/// All fields use `serde` defaults so that a partially-specified YAML file
/// will be deserialized correctly with sensible default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OcsConfig {
    /// Output JSON instead of human-readable text.
    #[serde(default)]
    pub json: bool,

    /// Game end limits.
    #[serde(default)]
    pub rules: GameRules,

    /// Report sections.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl OcsConfig {
    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.rules.accepted_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "rules.accepted-limit".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.rules.loss_limit < self.rules.accepted_limit {
            return Err(ConfigError::InvalidValue {
                key: "rules.loss-limit".to_string(),
                reason: format!(
                    "must be at least the accepted limit ({})",
                    self.rules.accepted_limit
                ),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load configuration from `config.yaml` inside the given `.ocs/` directory.
///
/// If the file does not exist, a default [`OcsConfig`] is returned.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
/// [`ConfigError::ParseError`] if it contains invalid YAML, or
/// [`ConfigError::InvalidValue`] if a value fails validation.
pub fn load_config(ocs_dir: &Path) -> Result<OcsConfig> {
    let config_path = ocs_dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(OcsConfig::default());
    }

    let content = std::fs::read_to_string(&config_path)?;

    // An empty file is valid and yields default config.
    if content.trim().is_empty() {
        return Ok(OcsConfig::default());
    }

    let config: OcsConfig = serde_yaml::from_str(&content)?;
    config.validate()?;
    debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Save configuration to `config.yaml` inside the given `.ocs/` directory.
///
/// The directory is created if it does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] on I/O failure or [`ConfigError::ParseError`]
/// if serialization fails.
pub fn save_config(ocs_dir: &Path, config: &OcsConfig) -> Result<()> {
    std::fs::create_dir_all(ocs_dir)?;

    let config_path = ocs_dir.join(CONFIG_FILE_NAME);
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(config_path, yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
