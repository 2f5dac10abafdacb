//! categexp - category income/expense roll-up reports
//!
//! This library rolls signed period amounts up a category forest and turns
//! the result into the "Where the Money Goes", "Where the Money Comes From"
//! and "Categories Summary" reports, plus a twelve-month category table.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Categories, amount indexes and report modes
//! - `reports`: The roll-up engine and the reports built on it
//! - `storage`: Snapshot input files
//! - `display`: Terminal formatting helpers
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust
//! use categexp::models::{AmountIndex, Category, CategoryForest, CategoryId, ReportMode};
//! use categexp::reports::aggregate;
//!
//! let forest = CategoryForest::new(vec![
//!     Category::new(1, "Food"),
//!     Category::with_parent(2, "Groceries", 1),
//! ])?;
//! let amounts: AmountIndex = vec![(CategoryId::new(2), -50.0)].into_iter().collect();
//!
//! let rows = aggregate(&forest, &amounts, ReportMode::ExpensesOnly)?;
//! assert_eq!(rows.len(), 3);
//! # Ok::<(), categexp::RollupError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{RollupError, RollupResult};
