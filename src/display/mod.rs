//! Display formatting for terminal output

pub mod report;

pub use report::{
    double_separator, format_amount, indent, left_align, right_align, separator, truncate,
};
