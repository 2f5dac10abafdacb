//! Reports module for categexp
//!
//! The category roll-up flattens the category forest into ordered rows; the
//! summary and over-time reports turn those inputs into terminal and CSV
//! output.

pub mod over_time;
pub mod rollup;
pub mod summary;

pub use over_time::{CategoryOverTimeReport, CategoryPeriodRow, PeriodTotals};
pub use rollup::{aggregate, CategoryRollup, ReportRow, RowKind};
pub use summary::{CategorySummaryReport, SummaryLine, SummaryLineKind};
