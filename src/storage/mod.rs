//! Storage layer for categexp
//!
//! Reads report input snapshots from JSON or YAML files. Nothing is written
//! back; the data layer that produced the snapshot owns persistence.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_document_required, DocumentFormat};
pub use snapshot::{AmountEntry, MonthlyEntry, MonthlySnapshot, ReportInputs, Snapshot};
