//! Report input snapshot
//!
//! A snapshot holds everything the reports read: the category list, the
//! period amount per category and, optionally, twelve monthly amounts per
//! category for the over-time report.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::file_io::read_document_required;
use crate::error::{RollupError, RollupResult};
use crate::models::{
    AmountIndex, Category, CategoryForest, CategoryId, MonthlyAmountIndex, MONTHS_IN_PERIOD,
};

/// Period amount for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountEntry {
    pub category_id: CategoryId,
    pub amount: f64,
}

/// Monthly amounts for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEntry {
    pub category_id: CategoryId,
    pub values: Vec<f64>,
}

/// Monthly section of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    /// Any day in the first month of the window
    pub start: NaiveDate,
    #[serde(default)]
    pub amounts: Vec<MonthlyEntry>,
}

/// Serializable report input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub amounts: Vec<AmountEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<MonthlySnapshot>,
}

/// Validated report inputs built from a snapshot
#[derive(Debug, Clone)]
pub struct ReportInputs {
    pub forest: CategoryForest,
    pub amounts: AmountIndex,
    pub monthly: Option<MonthlyAmountIndex>,
}

impl Snapshot {
    /// Load a snapshot from a JSON or YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> RollupResult<Self> {
        let path = path.as_ref();
        let snapshot: Snapshot = read_document_required(path)?;
        log::debug!(
            "Loaded snapshot {}: {} categories, {} amounts",
            path.display(),
            snapshot.categories.len(),
            snapshot.amounts.len()
        );
        Ok(snapshot)
    }

    /// Validate the snapshot and build the report inputs
    pub fn into_inputs(self) -> RollupResult<ReportInputs> {
        let forest = CategoryForest::new(self.categories)?;

        let mut amounts = AmountIndex::new();
        for entry in self.amounts {
            warn_if_unknown(&forest, entry.category_id);
            amounts.add(entry.category_id, entry.amount);
        }

        let monthly = match self.monthly {
            Some(section) => Some(monthly_index(&forest, section)?),
            None => None,
        };

        Ok(ReportInputs {
            forest,
            amounts,
            monthly,
        })
    }
}

fn monthly_index(
    forest: &CategoryForest,
    section: MonthlySnapshot,
) -> RollupResult<MonthlyAmountIndex> {
    let mut index = MonthlyAmountIndex::new(section.start);

    for entry in section.amounts {
        let values: [f64; MONTHS_IN_PERIOD] = entry.values.try_into().map_err(|v: Vec<f64>| {
            RollupError::Validation(format!(
                "category {} has {} monthly values, expected {}",
                entry.category_id,
                v.len(),
                MONTHS_IN_PERIOD
            ))
        })?;
        warn_if_unknown(forest, entry.category_id);
        index.add_series(entry.category_id, values);
    }

    Ok(index)
}

fn warn_if_unknown(forest: &CategoryForest, category_id: CategoryId) {
    if forest.get(category_id).is_none() {
        log::warn!(
            "Snapshot has amounts for unknown category {}; they are not reported",
            category_id
        );
    }
}
