//! Custom error types for categexp
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for categexp operations
#[derive(Error, Debug)]
pub enum RollupError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Input documents that are not valid JSON or YAML
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation errors for input data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// The category parent relation is not a forest
    #[error("Malformed category hierarchy: {0}")]
    MalformedHierarchy(String),
}

impl RollupError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for snapshot files
    pub fn snapshot_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Snapshot",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a malformed hierarchy error
    pub fn is_malformed_hierarchy(&self) -> bool {
        matches!(self, Self::MalformedHierarchy(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for RollupError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for RollupError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for categexp operations
pub type RollupResult<T> = Result<T, RollupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RollupError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = RollupError::category_not_found("42");
        assert_eq!(err.to_string(), "Category not found: 42");
        assert!(err.is_not_found());
        assert!(!err.is_malformed_hierarchy());
    }

    #[test]
    fn test_malformed_hierarchy_error() {
        let err = RollupError::MalformedHierarchy("category 3 is its own ancestor".into());
        assert_eq!(
            err.to_string(),
            "Malformed category hierarchy: category 3 is its own ancestor"
        );
        assert!(err.is_malformed_hierarchy());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RollupError = io_err.into();
        assert!(matches!(err, RollupError::Io(_)));
    }
}
