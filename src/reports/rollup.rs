//! Category roll-up
//!
//! Flattens a category forest and its period amounts into the ordered row
//! table consumed by the category reports.
//!
//! Siblings are visited in descending name order and every node is handled
//! post-order: its subcategories first, then the node itself. Each emitted
//! row goes to the front of the table, so the finished table lists a parent
//! before its descendants and siblings in ascending name order. Rows are
//! pushed in emission order and the buffer is reversed once at the end,
//! which gives the same table as inserting every row at the front.

use std::collections::HashSet;

use crate::error::{RollupError, RollupResult};
use crate::models::{AmountIndex, Category, CategoryHierarchy, CategoryId, ReportMode};

/// What a [`ReportRow`] stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// The category's own (filtered) amount
    Own,
    /// The subtree total of one subcategory, attributed to the parent line
    Contribution(CategoryId),
}

/// One row of the flattened category table
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// Category whose line this row belongs to
    pub category_id: CategoryId,
    /// Subcategory contributing to the line, `None` for the own-amount row
    pub subcategory_id: Option<CategoryId>,
    /// Display name of `category_id`
    pub name: String,
    /// Own amount, or the subcategory's subtree total for contribution rows
    pub amount: f64,
    /// Top-level ancestor of `category_id`
    pub group_id: CategoryId,
    /// Depth of `category_id` (0 = top level)
    pub level: usize,
}

impl ReportRow {
    /// Classify the row
    pub fn kind(&self) -> RowKind {
        match self.subcategory_id {
            None => RowKind::Own,
            Some(id) => RowKind::Contribution(id),
        }
    }

    /// Whether this is a category's own-amount row
    pub fn is_own(&self) -> bool {
        self.subcategory_id.is_none()
    }
}

/// Roll up `amounts` over `hierarchy` into a fresh row table
pub fn aggregate<H>(
    hierarchy: &H,
    amounts: &AmountIndex,
    mode: ReportMode,
) -> RollupResult<Vec<ReportRow>>
where
    H: CategoryHierarchy + ?Sized,
{
    let mut rollup = CategoryRollup::new();
    rollup.refresh(hierarchy, amounts, mode)?;
    Ok(rollup.into_rows())
}

/// Reusable row buffer for repeated report refreshes
#[derive(Debug, Clone, Default)]
pub struct CategoryRollup {
    rows: Vec<ReportRow>,
}

impl CategoryRollup {
    /// Create an empty roll-up
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows produced by the last refresh
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Take ownership of the rows
    pub fn into_rows(self) -> Vec<ReportRow> {
        self.rows
    }

    /// Discard the previous rows and rebuild them from the inputs
    ///
    /// Returns the sum of all top-level subtree totals.
    ///
    /// # Errors
    ///
    /// Returns `MalformedHierarchy` when a category is reached twice while
    /// walking the hierarchy. The buffer is left empty in that case.
    pub fn refresh<H>(
        &mut self,
        hierarchy: &H,
        amounts: &AmountIndex,
        mode: ReportMode,
    ) -> RollupResult<f64>
    where
        H: CategoryHierarchy + ?Sized,
    {
        self.rows.clear();

        let outcome = {
            let mut walker = Walker {
                hierarchy,
                amounts,
                mode,
                visited: HashSet::new(),
                rows: &mut self.rows,
            };
            descending_by_name(hierarchy.roots())
                .into_iter()
                .try_fold(0.0, |total, root| {
                    Ok::<f64, RollupError>(total + walker.append(root, root.id, 0)?)
                })
        };

        let total = match outcome {
            Ok(total) => total,
            Err(e) => {
                self.rows.clear();
                return Err(e);
            }
        };

        self.rows.reverse();

        log::debug!(
            "Category roll-up ({:?}): {} rows, total {:.2}",
            mode,
            self.rows.len(),
            total
        );

        Ok(total)
    }
}

struct Walker<'a, H: ?Sized> {
    hierarchy: &'a H,
    amounts: &'a AmountIndex,
    mode: ReportMode,
    visited: HashSet<CategoryId>,
    rows: &'a mut Vec<ReportRow>,
}

impl<'a, H: CategoryHierarchy + ?Sized> Walker<'a, H> {
    /// Emit the rows of `category`'s subtree and return its subtree total
    fn append(
        &mut self,
        category: &Category,
        group_id: CategoryId,
        level: usize,
    ) -> RollupResult<f64> {
        if !self.visited.insert(category.id) {
            return Err(RollupError::MalformedHierarchy(format!(
                "category {} ({}) reached more than once",
                category.id, category.name
            )));
        }

        let own = self.mode.filter(self.amounts.get(category.id));

        let hierarchy = self.hierarchy;
        let mut sub_total = 0.0;
        for subcategory in descending_by_name(hierarchy.subcategories(category.id)) {
            let amount = self.append(subcategory, group_id, level + 1)?;
            if amount != 0.0 {
                self.emit(category, Some(subcategory.id), amount, group_id, level);
            }
            sub_total += amount;
        }

        if own != 0.0 || sub_total != 0.0 {
            self.emit(category, None, own, group_id, level);
        }

        Ok(own + sub_total)
    }

    fn emit(
        &mut self,
        category: &Category,
        subcategory_id: Option<CategoryId>,
        amount: f64,
        group_id: CategoryId,
        level: usize,
    ) {
        self.rows.push(ReportRow {
            category_id: category.id,
            subcategory_id,
            name: category.name.clone(),
            amount,
            group_id,
            level,
        });
    }
}

/// Stable sort by name, then reverse
fn descending_by_name(mut categories: Vec<&Category>) -> Vec<&Category> {
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    categories.reverse();
    categories
}
