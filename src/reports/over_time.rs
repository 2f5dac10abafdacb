//! Category Income/Expenses Over Time Report
//!
//! Twelve monthly columns per category (listed by full name) with an overall
//! column, plus income, expense and net totals per month.

use std::io::Write;

use crate::config::Settings;
use crate::display::{format_amount, left_align, right_align, separator, truncate};
use crate::error::RollupResult;
use crate::models::{CategoryForest, CategoryId, MonthlyAmountIndex, MONTHS_IN_PERIOD};

const NAME_WIDTH: usize = 28;
const CELL_WIDTH: usize = 12;

/// One category line of the over-time report
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPeriodRow {
    /// Category ID
    pub category_id: CategoryId,
    /// Full category name, e.g. "Food:Groceries"
    pub name: String,
    /// Monthly amounts
    pub months: [f64; MONTHS_IN_PERIOD],
    /// Sum of the monthly amounts
    pub overall: f64,
}

/// Monthly totals of one kind (income, expenses or net)
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTotals {
    /// Footer label
    pub label: &'static str,
    /// Monthly totals
    pub months: [f64; MONTHS_IN_PERIOD],
}

impl PeriodTotals {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            months: [0.0; MONTHS_IN_PERIOD],
        }
    }

    /// Sum over all months
    pub fn overall(&self) -> f64 {
        self.months.iter().sum()
    }
}

/// Category Income/Expenses Over Time Report
#[derive(Debug, Clone)]
pub struct CategoryOverTimeReport {
    /// Month column labels, e.g. "Jan 2025"
    pub month_labels: Vec<String>,
    /// Categories with a non-zero overall amount, sorted by full name
    pub rows: Vec<CategoryPeriodRow>,
    /// Income totals (non-negative monthly amounts)
    pub income: PeriodTotals,
    /// Expense totals (negative monthly amounts)
    pub expenses: PeriodTotals,
    /// Net totals
    pub total: PeriodTotals,
}

impl CategoryOverTimeReport {
    /// Generate the report from monthly category amounts
    pub fn generate(forest: &CategoryForest, monthly: &MonthlyAmountIndex) -> RollupResult<Self> {
        let mut named = Vec::with_capacity(forest.len());
        for category in forest.categories() {
            named.push((forest.full_name(category.id)?, category.id));
        }
        named.sort_by(|a, b| a.0.cmp(&b.0));

        let mut income = PeriodTotals::new("Income");
        let mut expenses = PeriodTotals::new("Expenses");
        let mut total = PeriodTotals::new("Total");
        let mut rows = Vec::new();

        for (name, category_id) in named {
            let months = monthly.get(category_id);

            for (month, &value) in months.iter().enumerate() {
                if value < 0.0 {
                    expenses.months[month] += value;
                } else {
                    income.months[month] += value;
                }
                total.months[month] += value;
            }

            let overall: f64 = months.iter().sum();
            if overall != 0.0 {
                rows.push(CategoryPeriodRow {
                    category_id,
                    name,
                    months,
                    overall,
                });
            }
        }

        let month_labels = (0..MONTHS_IN_PERIOD)
            .map(|month| monthly.month_label(month))
            .collect();

        log::debug!(
            "Category over-time report from {}: {} of {} categories shown",
            monthly.start(),
            rows.len(),
            forest.len()
        );

        Ok(Self {
            month_labels,
            rows,
            income,
            expenses,
            total,
        })
    }

    /// Footer totals in display order
    pub fn totals(&self) -> [&PeriodTotals; 3] {
        [&self.income, &self.expenses, &self.total]
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = settings.currency_symbol.as_str();
        let width = NAME_WIDTH + (MONTHS_IN_PERIOD + 1) * (CELL_WIDTH + 1);
        let mut output = String::new();

        output.push_str("Category Income/Expenses\n");
        output.push_str(&separator(width));
        output.push('\n');

        output.push_str(&left_align("Category", NAME_WIDTH));
        for label in &self.month_labels {
            output.push(' ');
            output.push_str(&right_align(label, CELL_WIDTH));
        }
        output.push(' ');
        output.push_str(&right_align("Overall", CELL_WIDTH));
        output.push('\n');
        output.push_str(&separator(width));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&amount_line(&row.name, &row.months, row.overall, symbol));
        }

        output.push_str(&separator(width));
        output.push('\n');
        for totals in self.totals() {
            output.push_str(&amount_line(
                totals.label,
                &totals.months,
                totals.overall(),
                symbol,
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> RollupResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["Category".to_string()];
        header.extend(self.month_labels.iter().cloned());
        header.push("Overall".to_string());
        csv_writer.write_record(&header)?;

        for row in &self.rows {
            csv_writer.write_record(csv_record(&row.name, &row.months, row.overall))?;
        }
        for totals in self.totals() {
            csv_writer.write_record(csv_record(
                &totals.label.to_uppercase(),
                &totals.months,
                totals.overall(),
            ))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

fn amount_line(name: &str, months: &[f64], overall: f64, symbol: &str) -> String {
    let mut line = left_align(&truncate(name, NAME_WIDTH), NAME_WIDTH);
    for &value in months.iter().chain(std::iter::once(&overall)) {
        line.push(' ');
        line.push_str(&right_align(&format_amount(value, symbol), CELL_WIDTH));
    }
    line.push('\n');
    line
}

fn csv_record(name: &str, months: &[f64], overall: f64) -> Vec<String> {
    let mut record = Vec::with_capacity(months.len() + 2);
    record.push(name.to_string());
    record.extend(months.iter().map(|value| format!("{:.2}", value)));
    record.push(format!("{:.2}", overall));
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::NaiveDate;

    fn id(raw: i64) -> CategoryId {
        CategoryId::new(raw)
    }

    fn forest() -> CategoryForest {
        CategoryForest::new(vec![
            Category::new(1, "Food"),
            Category::with_parent(2, "Groceries", 1),
            Category::with_parent(3, "Dining", 1),
            Category::new(4, "Salary"),
            Category::new(5, "Gift"),
            Category::new(6, "Refunds"),
        ])
        .unwrap()
    }

    fn monthly() -> MonthlyAmountIndex {
        let mut index = MonthlyAmountIndex::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        index.add(id(2), 0, -100.0);
        index.add(id(2), 1, -50.0);
        index.add(id(3), 1, -30.0);
        index.add(id(4), 0, 2000.0);
        index.add(id(4), 1, 2000.0);
        // Nets to zero: hidden, but still counted in the totals
        index.add(id(6), 0, 25.0);
        index.add(id(6), 2, -25.0);
        index
    }

    #[test]
    fn test_rows_sorted_by_full_name() {
        let report = CategoryOverTimeReport::generate(&forest(), &monthly()).unwrap();
        let names: Vec<_> = report.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Food:Dining", "Food:Groceries", "Salary"]);

        let groceries = &report.rows[1];
        assert_eq!(groceries.category_id, id(2));
        assert_eq!(groceries.months[0], -100.0);
        assert_eq!(groceries.overall, -150.0);
    }

    #[test]
    fn test_totals() {
        let report = CategoryOverTimeReport::generate(&forest(), &monthly()).unwrap();

        assert_eq!(report.income.months[0], 2025.0);
        assert_eq!(report.expenses.months[0], -100.0);
        assert_eq!(report.expenses.months[1], -80.0);
        assert_eq!(report.expenses.months[2], -25.0);
        assert_eq!(report.total.months[0], 1925.0);
        assert_eq!(report.total.overall(), 3820.0);
        assert_eq!(report.income.overall() + report.expenses.overall(), 3820.0);
    }

    #[test]
    fn test_month_labels() {
        let report = CategoryOverTimeReport::generate(&forest(), &monthly()).unwrap();
        assert_eq!(report.month_labels.len(), MONTHS_IN_PERIOD);
        assert_eq!(report.month_labels[0], "Jan 2025");
        assert_eq!(report.month_labels[11], "Dec 2025");
    }

    #[test]
    fn test_format_terminal() {
        let report = CategoryOverTimeReport::generate(&forest(), &monthly()).unwrap();
        let text = report.format_terminal(&Settings::default());

        assert!(text.starts_with("Category Income/Expenses"));
        assert!(text.contains("Food:Groceries"));
        assert!(!text.contains("Refunds"));
        assert!(text.contains("-$150.00"));
        assert!(text.contains("$3820.00"));
    }

    #[test]
    fn test_export_csv() {
        let report = CategoryOverTimeReport::generate(&forest(), &monthly()).unwrap();
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert!(lines[0].starts_with("Category,Jan 2025,Feb 2025"));
        assert!(lines[0].ends_with("Dec 2025,Overall"));
        assert!(lines[1].starts_with("Food:Dining,0.00,-30.00,"));
        assert!(lines[1].ends_with(",-30.00"));
        assert_eq!(lines.len(), 1 + 3 + 3);
        assert!(lines[6].starts_with("TOTAL,1925.00"));
    }
}
