//! Core data models for categexp
//!
//! This module contains the inputs of the category reports: the category
//! forest, the per-category amount indexes and the report modes.

pub mod amounts;
pub mod category;
pub mod ids;
pub mod mode;

pub use amounts::{AmountIndex, MonthlyAmountIndex, MONTHS_IN_PERIOD};
pub use category::{Category, CategoryForest, CategoryHierarchy};
pub use ids::CategoryId;
pub use mode::{ReportKind, ReportMode};
