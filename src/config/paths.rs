//! Path management for categexp
//!
//! Provides XDG-compliant path resolution for configuration and input data.
//!
//! ## Path Resolution Order
//!
//! 1. `CATEGEXP_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/categexp` or `~/.config/categexp`
//! 3. Windows: `%APPDATA%\categexp`

use std::path::PathBuf;

use crate::error::RollupError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "CATEGEXP_DATA_DIR";

/// Manages all paths used by categexp
#[derive(Debug, Clone)]
pub struct CategexpPaths {
    /// Base directory for all categexp files
    base_dir: PathBuf,
}

impl CategexpPaths {
    /// Create a new CategexpPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, RollupError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CategexpPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/categexp/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the default snapshot file
    pub fn snapshot_file(&self) -> PathBuf {
        self.base_dir.join("snapshot.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), RollupError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| RollupError::Io(format!("Failed to create base directory: {}", e)))
    }
}

/// Resolve the default base directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, RollupError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                RollupError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("categexp"))
}

/// Resolve the default base directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, RollupError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| RollupError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("categexp"))
}
