//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds the global flags and knows where the
//! configuration lives. Configuration is read on demand so commands that
//! never need it (`version`, `completion`) cannot fail on a broken file.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ocs_config::config::{OcsConfig, load_config};
use ocs_config::ocs_dir::find_ocs_dir;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Explicit configuration directory from `--config-dir`.
    pub config_dir: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        Self {
            config_dir: global.config_dir.clone(),
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// Returns the configuration directory in use, if any.
    ///
    /// Priority: `--config-dir` > `$OCS_DIR` > nearest `.ocs/` above the
    /// working directory.
    pub fn resolve_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref p) = self.config_dir {
            return Some(p.clone());
        }
        let cwd = env::current_dir().ok()?;
        find_ocs_dir(&cwd)
    }

    /// Load the effective configuration, falling back to defaults when no
    /// configuration directory exists.
    pub fn load_config(&self) -> Result<OcsConfig> {
        match self.resolve_config_dir() {
            Some(dir) => load_config(&dir)
                .with_context(|| format!("failed to load config from {}", dir.display())),
            None => Ok(OcsConfig::default()),
        }
    }

    /// Whether output should be JSON, by flag or by configuration.
    pub fn wants_json(&self, config: &OcsConfig) -> bool {
        self.json || config.json
    }
}
