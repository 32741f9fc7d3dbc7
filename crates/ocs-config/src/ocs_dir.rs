//! Discovery and management of the `.ocs/` directory.
//!
//! The `.ocs/` directory holds the tool's project-level configuration. This
//! module finds it by walking up the directory tree and creates it on
//! request.

use crate::config::ConfigError;
use std::path::{Path, PathBuf};

/// The name of the ocs metadata directory.
pub const OCS_DIR_NAME: &str = ".ocs";

/// The name of the environment variable that can override the ocs directory.
pub const OCS_DIR_ENV: &str = "OCS_DIR";

/// Walk up the directory tree from `start` looking for a `.ocs/` directory.
///
/// Returns the path to the `.ocs/` directory if found, or `None` if the
/// filesystem root is reached without finding one. The `OCS_DIR`
/// environment variable is checked first (highest priority).
///
/// # Examples
///
/// ```no_run
/// use ocs_config::ocs_dir::find_ocs_dir;
/// use std::path::Path;
///
/// if let Some(dir) = find_ocs_dir(Path::new(".")) {
///     println!("Found ocs dir at {}", dir.display());
/// }
/// ```
pub fn find_ocs_dir(start: &Path) -> Option<PathBuf> {
    // 1. Check OCS_DIR environment variable (highest priority).
    if let Ok(env_dir) = std::env::var(OCS_DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }

    // 2. Walk up from `start` looking for .ocs/.
    let start = start.canonicalize().ok()?;

    let mut current = start.as_path();
    loop {
        let candidate = current.join(OCS_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent;
            }
            _ => break, // Reached filesystem root.
        }
    }

    None
}

/// Walk up the directory tree looking for `.ocs/`, returning an error if
/// not found.
///
/// # Errors
///
/// Returns [`ConfigError::OcsDirNotFound`] if no `.ocs/` directory is found.
pub fn find_ocs_dir_or_error(start: &Path) -> Result<PathBuf, ConfigError> {
    find_ocs_dir(start).ok_or(ConfigError::OcsDirNotFound)
}

/// Ensure a `.ocs/` directory exists at the given path.
///
/// If `path` itself is not called `.ocs`, a `.ocs/` subdirectory is created
/// under it.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if directory creation fails.
pub fn ensure_ocs_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let ocs_dir = if path.ends_with(OCS_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(OCS_DIR_NAME)
    };

    std::fs::create_dir_all(&ocs_dir)?;
    Ok(ocs_dir)
}
