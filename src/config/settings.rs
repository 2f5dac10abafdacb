//! User settings for categexp
//!
//! Manages report preferences: the default report, the currency symbol
//! used for display and the indentation of nested categories.

use serde::{Deserialize, Serialize};

use super::paths::CategexpPaths;
use crate::error::RollupError;
use crate::models::ReportKind;

/// User settings for categexp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Report shown when none is named on the command line
    #[serde(default)]
    pub default_report: ReportKind,

    /// Currency symbol for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Spaces per nesting level in terminal output
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_indent_width() -> usize {
    4
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_report: ReportKind::default(),
            currency_symbol: default_currency(),
            indent_width: default_indent_width(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &CategexpPaths) -> Result<Self, RollupError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                RollupError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                RollupError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CategexpPaths) -> Result<(), RollupError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            RollupError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            RollupError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
