//! Per-category amount indexes
//!
//! Amounts are the signed totals attributed directly to a category for the
//! reporting period, excluding its subcategories. They are computed by the
//! data layer and handed to the reports read-only.

use chrono::{Datelike, Months, NaiveDate};
use std::collections::HashMap;

use super::ids::CategoryId;

/// Number of months covered by a [`MonthlyAmountIndex`]
pub const MONTHS_IN_PERIOD: usize = 12;

/// Signed period totals keyed by category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmountIndex {
    amounts: HashMap<CategoryId, f64>,
}

impl AmountIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the total of `category_id`
    pub fn add(&mut self, category_id: CategoryId, amount: f64) {
        *self.amounts.entry(category_id).or_insert(0.0) += amount;
    }

    /// Total for a category; categories without an entry read as zero
    pub fn get(&self, category_id: CategoryId) -> f64 {
        self.amounts.get(&category_id).copied().unwrap_or(0.0)
    }

    /// Number of categories with an entry
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// Whether the index has no entries
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

impl FromIterator<(CategoryId, f64)> for AmountIndex {
    fn from_iter<I: IntoIterator<Item = (CategoryId, f64)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (category_id, amount) in iter {
            index.add(category_id, amount);
        }
        index
    }
}

/// Twelve consecutive monthly totals per category
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAmountIndex {
    start: NaiveDate,
    amounts: HashMap<CategoryId, [f64; MONTHS_IN_PERIOD]>,
}

impl MonthlyAmountIndex {
    /// Create an empty index whose window opens on the month of `start`
    pub fn new(start: NaiveDate) -> Self {
        Self {
            start: first_of_month(start),
            amounts: HashMap::new(),
        }
    }

    /// First day of the first month in the window
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Add `amount` to month `month` (0-based) of `category_id`
    ///
    /// Months outside the window are ignored.
    pub fn add(&mut self, category_id: CategoryId, month: usize, amount: f64) {
        if month >= MONTHS_IN_PERIOD {
            log::warn!(
                "Ignoring amount for category {} in month {} outside the {}-month window",
                category_id,
                month,
                MONTHS_IN_PERIOD
            );
            return;
        }
        self.amounts
            .entry(category_id)
            .or_insert([0.0; MONTHS_IN_PERIOD])[month] += amount;
    }

    /// Add a full twelve-month series for a category
    pub fn add_series(&mut self, category_id: CategoryId, values: [f64; MONTHS_IN_PERIOD]) {
        for (month, value) in values.into_iter().enumerate() {
            self.add(category_id, month, value);
        }
    }

    /// Monthly totals for a category; missing categories read as zeros
    pub fn get(&self, category_id: CategoryId) -> [f64; MONTHS_IN_PERIOD] {
        self.amounts
            .get(&category_id)
            .copied()
            .unwrap_or([0.0; MONTHS_IN_PERIOD])
    }

    /// First day of month `month` (0-based) in the window
    pub fn month_start(&self, month: usize) -> Option<NaiveDate> {
        self.start.checked_add_months(Months::new(month as u32))
    }

    /// Short label for month `month`, e.g. "Jan 2025"
    pub fn month_label(&self, month: usize) -> String {
        self.month_start(month)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_default()
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day0(0).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_category_reads_zero() {
        let index = AmountIndex::new();
        assert_eq!(index.get(CategoryId::new(1)), 0.0);
        assert!(index.is_empty());
    }

    #[test]
    fn test_repeated_entries_are_summed() {
        let index: AmountIndex = vec![
            (CategoryId::new(1), -10.0),
            (CategoryId::new(2), 5.0),
            (CategoryId::new(1), -2.5),
        ]
        .into_iter()
        .collect();

        assert_eq!(index.get(CategoryId::new(1)), -12.5);
        assert_eq!(index.get(CategoryId::new(2)), 5.0);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_monthly_window() {
        let start = NaiveDate::from_ymd_opt(2024, 11, 15).unwrap();
        let mut index = MonthlyAmountIndex::new(start);

        assert_eq!(index.start(), NaiveDate::from_ymd_opt(2024, 11, 1).unwrap());
        assert_eq!(index.month_label(0), "Nov 2024");
        assert_eq!(index.month_label(2), "Jan 2025");
        assert_eq!(index.month_label(11), "Oct 2025");

        index.add(CategoryId::new(3), 1, -20.0);
        index.add(CategoryId::new(3), 1, -5.0);
        index.add(CategoryId::new(3), 12, -99.0);

        let series = index.get(CategoryId::new(3));
        assert_eq!(series[1], -25.0);
        assert_eq!(series.iter().sum::<f64>(), -25.0);
        assert_eq!(index.get(CategoryId::new(4)), [0.0; MONTHS_IN_PERIOD]);
    }
}
