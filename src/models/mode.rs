//! Report modes and report kinds
//!
//! A mode decides which sign of a category's own amount is reported. Each
//! category report kind runs the roll-up in one fixed mode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which sign of a category's own amount contributes to its row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReportMode {
    /// Keep negative amounts, zero out positive ones
    ExpensesOnly,
    /// Keep positive amounts, zero out negative ones
    IncomeOnly,
    /// Pass amounts through unchanged
    #[default]
    Both,
}

impl ReportMode {
    /// Apply the mode to a raw own amount
    pub fn filter(self, amount: f64) -> f64 {
        match self {
            Self::ExpensesOnly if amount > 0.0 => 0.0,
            Self::IncomeOnly if amount < 0.0 => 0.0,
            _ => amount,
        }
    }
}

/// The category reports built on the roll-up engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// "Where the Money Goes" (expenses only)
    WhereMoneyGoes,
    /// "Where the Money Comes From" (income only)
    WhereMoneyComesFrom,
    /// "Categories Summary" (income and expenses)
    #[default]
    CategoriesSummary,
}

impl ReportKind {
    /// Report title
    pub fn title(self) -> &'static str {
        match self {
            Self::WhereMoneyGoes => "Where the Money Goes",
            Self::WhereMoneyComesFrom => "Where the Money Comes From",
            Self::CategoriesSummary => "Categories Summary",
        }
    }

    /// Roll-up mode used by this report
    pub fn mode(self) -> ReportMode {
        match self {
            Self::WhereMoneyGoes => ReportMode::ExpensesOnly,
            Self::WhereMoneyComesFrom => ReportMode::IncomeOnly,
            Self::CategoriesSummary => ReportMode::Both,
        }
    }

    /// Whether the footer breaks the grand total into expenses and income
    pub fn shows_split_totals(self) -> bool {
        matches!(self, Self::CategoriesSummary)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
