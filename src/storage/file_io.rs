//! File input utilities
//!
//! Report inputs are read-only documents in JSON or YAML, chosen by the
//! file extension.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::RollupError;

/// Serialization format of an input document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a path's extension (JSON unless `.yaml`/`.yml`)
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Read a JSON or YAML document, returning an error if file doesn't exist
pub fn read_document_required<T, P>(path: P) -> Result<T, RollupError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(RollupError::snapshot_not_found(path.display().to_string()));
    }

    let file = File::open(path)
        .map_err(|e| RollupError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);

    match DocumentFormat::from_path(path) {
        DocumentFormat::Json => serde_json::from_reader(reader).map_err(|e| {
            RollupError::Parse(format!("Failed to parse {} as JSON: {}", path.display(), e))
        }),
        DocumentFormat::Yaml => serde_yaml::from_reader(reader).map_err(|e| {
            RollupError::Parse(format!("Failed to parse {} as YAML: {}", path.display(), e))
        }),
    }
}
