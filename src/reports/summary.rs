//! Category Summary Report
//!
//! Turns the roll-up rows into display lines for the three category reports
//! ("Where the Money Goes", "Where the Money Comes From" and "Categories
//! Summary"): collapsible headers with subtree totals, own-amount lines,
//! dotted tree keys and the expense/income footer.

use std::collections::{HashMap, HashSet};
use std::io::Write;

use crate::config::Settings;
use crate::display::{double_separator, format_amount, indent, left_align, right_align, separator};
use crate::error::RollupResult;
use crate::models::{AmountIndex, CategoryHierarchy, CategoryId, ReportKind};

use super::rollup::{aggregate, ReportRow};

const REPORT_WIDTH: usize = 72;
const NAME_WIDTH: usize = 40;
const AMOUNT_WIDTH: usize = 15;

/// What a summary line shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SummaryLineKind {
    /// Collapsible header carrying the subtree total
    Header { total: f64 },
    /// The category's own amount
    Amount { amount: f64 },
}

/// One display line of the summary report
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    /// Category shown on the line
    pub category_id: CategoryId,
    /// Category display name
    pub name: String,
    /// Depth of the category (0 = top level)
    pub level: usize,
    /// Indentation steps (one more than `level` for amounts under a header)
    pub depth: usize,
    /// Dotted tree key of the line, e.g. "4.6."
    pub row_id: String,
    /// Tree key of the enclosing line, "0." at the top level
    pub parent_row_id: String,
    /// Header or amount
    pub kind: SummaryLineKind,
}

/// Category Summary Report
#[derive(Debug, Clone)]
pub struct CategorySummaryReport {
    /// Which report this is
    pub kind: ReportKind,
    /// Roll-up rows the report was built from
    pub rows: Vec<ReportRow>,
    /// Display lines in order
    pub lines: Vec<SummaryLine>,
    /// Sum of negative own amounts
    pub total_expenses: f64,
    /// Sum of positive own amounts
    pub total_income: f64,
}

impl CategorySummaryReport {
    /// Roll up `amounts` over `hierarchy` and build the report
    pub fn generate<H>(kind: ReportKind, hierarchy: &H, amounts: &AmountIndex) -> RollupResult<Self>
    where
        H: CategoryHierarchy + ?Sized,
    {
        let rows = aggregate(hierarchy, amounts, kind.mode())?;
        Ok(Self::from_rows(kind, rows))
    }

    /// Build the report from already rolled-up rows
    pub fn from_rows(kind: ReportKind, rows: Vec<ReportRow>) -> Self {
        // Categories with subcategory lines, plus every top-level category
        let toggles: HashSet<CategoryId> = rows
            .iter()
            .filter(|r| !r.is_own() || r.level == 0)
            .map(|r| r.category_id)
            .collect();

        let mut subtree_totals: HashMap<(CategoryId, CategoryId), f64> = HashMap::new();
        let mut total_expenses = 0.0;
        let mut total_income = 0.0;

        for row in &rows {
            *subtree_totals
                .entry((row.group_id, row.category_id))
                .or_insert(0.0) += row.amount;

            if row.is_own() {
                if row.amount < 0.0 {
                    total_expenses += row.amount;
                } else {
                    total_income += row.amount;
                }
            }
        }

        let mut lines = Vec::new();
        let mut keys = TreeKeys::default();
        let mut opened: HashSet<(CategoryId, CategoryId)> = HashSet::new();

        for row in &rows {
            let subtree_total = subtree_totals
                .get(&(row.group_id, row.category_id))
                .copied()
                .unwrap_or(0.0);

            if !row.is_own() {
                // Parent whose children cancel out has no own row
                if opened.insert((row.group_id, row.category_id)) {
                    let (row_id, parent_row_id) =
                        keys.next(row.group_id, row.category_id, row.level);
                    lines.push(header_line(row, row_id, parent_row_id, subtree_total));
                }
                continue;
            }

            opened.insert((row.group_id, row.category_id));
            let (row_id, parent_row_id) = keys.next(row.group_id, row.category_id, row.level);
            let has_toggle = toggles.contains(&row.category_id);

            if has_toggle {
                lines.push(header_line(
                    row,
                    row_id.clone(),
                    parent_row_id.clone(),
                    subtree_total,
                ));
            }

            if row.amount != 0.0 {
                lines.push(SummaryLine {
                    category_id: row.category_id,
                    name: row.name.clone(),
                    level: row.level,
                    depth: row.level + usize::from(has_toggle),
                    parent_row_id: if has_toggle {
                        row_id.clone()
                    } else {
                        parent_row_id
                    },
                    row_id,
                    kind: SummaryLineKind::Amount { amount: row.amount },
                });
            }
        }

        log::debug!(
            "{}: {} rows, {} lines",
            kind.title(),
            rows.len(),
            lines.len()
        );

        Self {
            kind,
            rows,
            lines,
            total_expenses,
            total_income,
        }
    }

    /// Expenses plus income
    pub fn grand_total(&self) -> f64 {
        self.total_expenses + self.total_income
    }

    /// Whether no category had a non-zero amount
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Subtree total shown on a category's header, if it has one
    pub fn header_total(&self, category_id: CategoryId) -> Option<f64> {
        self.lines.iter().find_map(|line| match line.kind {
            SummaryLineKind::Header { total } if line.category_id == category_id => Some(total),
            _ => None,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = settings.currency_symbol.as_str();
        let mut output = String::new();

        output.push_str(self.kind.title());
        output.push('\n');
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{} {} {}\n",
            left_align("Category", NAME_WIDTH),
            right_align("Amount", AMOUNT_WIDTH),
            right_align("Total", AMOUNT_WIDTH)
        ));
        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');

        if self.lines.is_empty() {
            output.push_str("No category activity.\n");
        }

        for line in &self.lines {
            let pad = indent(line.depth, settings.indent_width);
            let (label, amount, total) = match line.kind {
                SummaryLineKind::Header { total } => (
                    format!("{}+ {}", pad, line.name),
                    String::new(),
                    format_amount(total, symbol),
                ),
                SummaryLineKind::Amount { amount } => (
                    format!("{}{}", pad, line.name),
                    format_amount(amount, symbol),
                    String::new(),
                ),
            };
            output.push_str(&format!(
                "{} {} {}\n",
                left_align(&label, NAME_WIDTH),
                right_align(&amount, AMOUNT_WIDTH),
                right_align(&total, AMOUNT_WIDTH)
            ));
        }

        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');
        if self.kind.shows_split_totals() {
            output.push_str(&footer_line(
                "Total Expenses:",
                format_amount(self.total_expenses, symbol),
            ));
            output.push_str(&footer_line(
                "Total Income:",
                format_amount(self.total_income, symbol),
            ));
        }
        output.push_str(&footer_line(
            "Grand Total:",
            format_amount(self.grand_total(), symbol),
        ));

        output
    }

    /// Export the report lines to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> RollupResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "Row ID",
            "Parent Row ID",
            "Category ID",
            "Category",
            "Level",
            "Amount",
            "Total",
        ])?;

        for line in &self.lines {
            let (amount, total) = match line.kind {
                SummaryLineKind::Header { total } => (String::new(), format!("{:.2}", total)),
                SummaryLineKind::Amount { amount } => (format!("{:.2}", amount), String::new()),
            };
            csv_writer.write_record([
                line.row_id.clone(),
                line.parent_row_id.clone(),
                line.category_id.to_string(),
                line.name.clone(),
                line.level.to_string(),
                amount,
                total,
            ])?;
        }

        if self.kind.shows_split_totals() {
            csv_writer.write_record(total_record("TOTAL EXPENSES", self.total_expenses))?;
            csv_writer.write_record(total_record("TOTAL INCOME", self.total_income))?;
        }
        csv_writer.write_record(total_record("GRAND TOTAL", self.grand_total()))?;

        csv_writer.flush()?;
        Ok(())
    }
}

fn header_line(row: &ReportRow, row_id: String, parent_row_id: String, total: f64) -> SummaryLine {
    SummaryLine {
        category_id: row.category_id,
        name: row.name.clone(),
        level: row.level,
        depth: row.level,
        row_id,
        parent_row_id,
        kind: SummaryLineKind::Header { total },
    }
}

fn footer_line(label: &str, value: String) -> String {
    format!(
        "{} {}\n",
        left_align(label, NAME_WIDTH + AMOUNT_WIDTH + 1),
        right_align(&value, AMOUNT_WIDTH)
    )
}

fn total_record(label: &str, amount: f64) -> [String; 7] {
    [
        String::new(),
        String::new(),
        String::new(),
        label.to_string(),
        String::new(),
        String::new(),
        format!("{:.2}", amount),
    ]
}

/// Dotted tree keys built from the path of category ids below a group
#[derive(Debug, Default)]
struct TreeKeys {
    path: Vec<CategoryId>,
}

impl TreeKeys {
    /// Keys for the next line; returns `(row_id, parent_row_id)`
    fn next(
        &mut self,
        group_id: CategoryId,
        category_id: CategoryId,
        level: usize,
    ) -> (String, String) {
        if self.path.first() != Some(&group_id) {
            self.path.clear();
            self.path.push(group_id);
        }

        // A missing intermediate line leaves the path shorter than `level`
        self.path.truncate(level);
        self.path.push(category_id);

        let parent = &self.path[..self.path.len() - 1];
        let parent_row_id = if parent.is_empty() {
            "0.".to_string()
        } else {
            dotted(parent)
        };

        (dotted(&self.path), parent_row_id)
    }
}

fn dotted(path: &[CategoryId]) -> String {
    path.iter().map(|id| format!("{}.", id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryForest};

    fn id(raw: i64) -> CategoryId {
        CategoryId::new(raw)
    }

    fn forest() -> CategoryForest {
        CategoryForest::new(vec![
            Category::new(1, "Bills"),
            Category::with_parent(2, "Electric", 1),
            Category::with_parent(3, "Water", 1),
            Category::new(4, "Auto"),
            Category::with_parent(5, "Fuel", 4),
            Category::with_parent(6, "Repairs", 4),
            Category::with_parent(7, "Tyres", 6),
            Category::new(9, "Salary"),
        ])
        .unwrap()
    }

    fn amounts() -> AmountIndex {
        vec![
            (id(2), -40.0),
            (id(3), -25.0),
            (id(4), -1.0),
            (id(5), -60.0),
            (id(6), -10.0),
            (id(7), -200.0),
            (id(9), 2500.0),
        ]
        .into_iter()
        .collect()
    }

    fn summary() -> CategorySummaryReport {
        CategorySummaryReport::generate(ReportKind::CategoriesSummary, &forest(), &amounts())
            .unwrap()
    }

    #[test]
    fn test_lines_and_tree_keys() {
        let report = summary();

        let shape: Vec<_> = report
            .lines
            .iter()
            .map(|l| {
                let header = matches!(l.kind, SummaryLineKind::Header { .. });
                (l.category_id.get(), header, l.row_id.as_str(), l.parent_row_id.as_str())
            })
            .collect();

        assert_eq!(
            shape,
            vec![
                (4, true, "4.", "0."),
                (4, false, "4.", "4."),
                (5, false, "4.5.", "4."),
                (6, true, "4.6.", "4."),
                (6, false, "4.6.", "4.6."),
                (7, false, "4.6.7.", "4.6."),
                (1, true, "1.", "0."),
                (2, false, "1.2.", "1."),
                (3, false, "1.3.", "1."),
                (9, true, "9.", "0."),
                (9, false, "9.", "9."),
            ]
        );
    }

    #[test]
    fn test_header_totals_cover_subtree() {
        let report = summary();
        assert_eq!(report.header_total(id(4)), Some(-271.0));
        assert_eq!(report.header_total(id(6)), Some(-210.0));
        assert_eq!(report.header_total(id(1)), Some(-65.0));
        assert_eq!(report.header_total(id(9)), Some(2500.0));
        assert_eq!(report.header_total(id(5)), None);
    }

    #[test]
    fn test_header_without_own_amount() {
        let report = summary();
        // Bills has no own amount: header only, no amount line
        let bills: Vec<_> = report.lines.iter().filter(|l| l.category_id == id(1)).collect();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].depth, 0);

        // Amount lines below a header are indented one extra step
        let repairs_amount = report
            .lines
            .iter()
            .find(|l| l.category_id == id(6) && matches!(l.kind, SummaryLineKind::Amount { .. }))
            .unwrap();
        assert_eq!(repairs_amount.level, 1);
        assert_eq!(repairs_amount.depth, 2);
    }

    #[test]
    fn test_totals() {
        let report = summary();
        assert_eq!(report.total_expenses, -336.0);
        assert_eq!(report.total_income, 2500.0);
        assert_eq!(report.grand_total(), 2164.0);
    }

    #[test]
    fn test_where_money_goes_drops_income() {
        let report =
            CategorySummaryReport::generate(ReportKind::WhereMoneyGoes, &forest(), &amounts())
                .unwrap();
        assert_eq!(report.total_income, 0.0);
        assert!(report.lines.iter().all(|l| l.category_id != id(9)));

        let text = report.format_terminal(&Settings::default());
        assert!(text.starts_with("Where the Money Goes"));
        assert!(!text.contains("Total Income:"));
        assert!(text.contains("Grand Total:"));
        assert!(text.contains("-$336.00"));
    }

    #[test]
    fn test_format_terminal() {
        let report = summary();
        let text = report.format_terminal(&Settings::default());

        assert!(text.contains("+ Auto"));
        assert!(text.contains("        Tyres"));
        assert!(text.contains("Total Expenses:"));
        assert!(text.contains("Total Income:"));
        assert!(text.contains("$2164.00"));
    }

    #[test]
    fn test_empty_report() {
        let report = CategorySummaryReport::generate(
            ReportKind::CategoriesSummary,
            &forest(),
            &AmountIndex::new(),
        )
        .unwrap();

        assert!(report.is_empty());
        assert!(report.lines.is_empty());
        assert!(report
            .format_terminal(&Settings::default())
            .contains("No category activity."));
    }

    #[test]
    fn test_export_csv() {
        let report = summary();
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Row ID,Parent Row ID,Category ID,Category,Level,Amount,Total"
        );
        assert_eq!(lines[1], "4.,0.,4,Auto,0,,-271.00");
        assert_eq!(lines[2], "4.,4.,4,Auto,0,-1.00,");
        assert_eq!(lines.len(), 1 + report.lines.len() + 3);
        assert_eq!(*lines.last().unwrap(), ",,,GRAND TOTAL,,,2164.00");
    }

    #[test]
    fn test_tree_keys_return_to_shallower_level() {
        let mut keys = TreeKeys::default();
        assert_eq!(keys.next(id(1), id(1), 0), ("1.".into(), "0.".into()));
        assert_eq!(keys.next(id(1), id(2), 1), ("1.2.".into(), "1.".into()));
        assert_eq!(keys.next(id(1), id(3), 2), ("1.2.3.".into(), "1.2.".into()));
        assert_eq!(keys.next(id(1), id(4), 1), ("1.4.".into(), "1.".into()));
        assert_eq!(keys.next(id(5), id(5), 0), ("5.".into(), "0.".into()));
    }

    #[test]
    fn test_tree_keys_stay_inside_their_group() {
        let mut keys = TreeKeys::default();
        assert_eq!(keys.next(id(1), id(1), 0), ("1.".into(), "0.".into()));
        assert_eq!(keys.next(id(1), id(2), 1), ("1.2.".into(), "1.".into()));

        // Level 1 line of group 4 without a level 0 line before it
        assert_eq!(keys.next(id(4), id(6), 1), ("4.6.".into(), "4.".into()));
        // Level 2 line whose level 1 parent never got a line
        assert_eq!(keys.next(id(9), id(7), 2), ("9.7.".into(), "9.".into()));
    }

    #[test]
    fn test_cancelling_children_get_a_header() {
        let forest = CategoryForest::new(vec![
            Category::new(4, "Auto"),
            Category::new(1, "Transfers"),
            Category::with_parent(2, "In", 1),
            Category::with_parent(3, "Out", 1),
        ])
        .unwrap();
        let amounts: AmountIndex = vec![(id(4), -1.0), (id(2), 10.0), (id(3), -10.0)]
            .into_iter()
            .collect();

        let report =
            CategorySummaryReport::generate(ReportKind::CategoriesSummary, &forest, &amounts)
                .unwrap();

        let shape: Vec<_> = report
            .lines
            .iter()
            .map(|l| {
                let header = matches!(l.kind, SummaryLineKind::Header { .. });
                (
                    l.category_id.get(),
                    header,
                    l.depth,
                    l.row_id.as_str(),
                    l.parent_row_id.as_str(),
                )
            })
            .collect();

        assert_eq!(
            shape,
            vec![
                (4, true, 0, "4.", "0."),
                (4, false, 1, "4.", "4."),
                (1, true, 0, "1.", "0."),
                (2, false, 1, "1.2.", "1."),
                (3, false, 1, "1.3.", "1."),
            ]
        );
        assert_eq!(report.header_total(id(1)), Some(0.0));
        assert_eq!(report.total_expenses, -11.0);
        assert_eq!(report.total_income, 10.0);
    }
}
