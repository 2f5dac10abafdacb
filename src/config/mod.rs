//! Configuration module for categexp
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::CategexpPaths;
pub use settings::Settings;
