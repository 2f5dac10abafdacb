//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the reports.

pub mod report;

pub use report::{handle_report_command, run_category_report, ReportArgs, ReportCommands};
