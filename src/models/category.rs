//! Category model and the category forest
//!
//! Categories form a forest: a category without a parent is a root, and a
//! category's subcategories are exactly those naming it as their parent.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::ids::CategoryId;
use crate::error::{RollupError, RollupResult};

/// Separator used when joining a category path into a full name
pub const FULL_NAME_DELIMITER: &str = ":";

/// A single income/expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Parent category, `None` for a root
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

impl Category {
    /// Create a new root category
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(id),
            name: name.into(),
            parent_id: None,
        }
    }

    /// Create a new category below `parent_id`
    pub fn with_parent(id: i64, name: impl Into<String>, parent_id: i64) -> Self {
        Self {
            id: CategoryId::new(id),
            name: name.into(),
            parent_id: Some(CategoryId::new(parent_id)),
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.parent_id == Some(self.id) {
            return Err(CategoryValidationError::OwnParent);
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    OwnParent,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::OwnParent => write!(f, "Category cannot be its own parent"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

/// Read access to a category hierarchy
///
/// The roll-up engine only needs the roots and the immediate subcategories
/// of a node. Both are returned in their natural (storage) order; callers
/// apply their own sorting.
pub trait CategoryHierarchy {
    /// Categories without a parent
    fn roots(&self) -> Vec<&Category>;

    /// Immediate subcategories of `id`
    fn subcategories(&self, id: CategoryId) -> Vec<&Category>;
}

/// A validated forest of categories
#[derive(Debug, Clone, Default)]
pub struct CategoryForest {
    categories: Vec<Category>,
    index: HashMap<CategoryId, usize>,
    children: HashMap<CategoryId, Vec<usize>>,
    roots: Vec<usize>,
}

impl CategoryForest {
    /// Build a forest from a flat category list
    ///
    /// # Errors
    ///
    /// Returns `MalformedHierarchy` for duplicate ids, parents that do not
    /// exist, or parent chains that loop, and `Validation` for categories
    /// that fail [`Category::validate`] for other reasons.
    pub fn new(categories: Vec<Category>) -> RollupResult<Self> {
        let mut index = HashMap::with_capacity(categories.len());
        for (pos, category) in categories.iter().enumerate() {
            match category.validate() {
                Ok(()) => {}
                Err(CategoryValidationError::OwnParent) => {
                    return Err(RollupError::MalformedHierarchy(format!(
                        "category {} is its own parent",
                        category.id
                    )));
                }
                Err(e) => {
                    return Err(RollupError::Validation(format!(
                        "category {}: {}",
                        category.id, e
                    )));
                }
            }

            if index.insert(category.id, pos).is_some() {
                return Err(RollupError::MalformedHierarchy(format!(
                    "duplicate category id {}",
                    category.id
                )));
            }
        }

        let mut children: HashMap<CategoryId, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for (pos, category) in categories.iter().enumerate() {
            match category.parent_id {
                None => roots.push(pos),
                Some(parent_id) => {
                    if !index.contains_key(&parent_id) {
                        return Err(RollupError::MalformedHierarchy(format!(
                            "category {} refers to missing parent {}",
                            category.id, parent_id
                        )));
                    }
                    children.entry(parent_id).or_default().push(pos);
                }
            }
        }

        let forest = Self {
            categories,
            index,
            children,
            roots,
        };
        forest.check_acyclic()?;
        Ok(forest)
    }

    /// Every category must reach a root by following parent links
    fn check_acyclic(&self) -> RollupResult<()> {
        let mut grounded: HashSet<CategoryId> = HashSet::new();

        for category in &self.categories {
            let mut path: Vec<CategoryId> = Vec::new();
            let mut on_path: HashSet<CategoryId> = HashSet::new();
            let mut current = Some(category);

            while let Some(node) = current {
                if grounded.contains(&node.id) {
                    break;
                }
                if !on_path.insert(node.id) {
                    return Err(RollupError::MalformedHierarchy(format!(
                        "category {} is its own ancestor",
                        node.id
                    )));
                }
                path.push(node.id);
                current = node.parent_id.and_then(|id| self.get(id));
            }

            grounded.extend(path);
        }

        Ok(())
    }

    /// Number of categories in the forest
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the forest has no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// All categories in their original order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.index.get(&id).map(|&pos| &self.categories[pos])
    }

    /// Full path name, e.g. "Food:Groceries"
    pub fn full_name(&self, id: CategoryId) -> RollupResult<String> {
        let mut names = Vec::new();
        let mut current = Some(
            self.get(id)
                .ok_or_else(|| RollupError::category_not_found(id.to_string()))?,
        );

        while let Some(category) = current {
            names.push(category.name.as_str());
            current = category.parent_id.and_then(|parent| self.get(parent));
        }

        names.reverse();
        Ok(names.join(FULL_NAME_DELIMITER))
    }
}

impl CategoryHierarchy for CategoryForest {
    fn roots(&self) -> Vec<&Category> {
        self.roots.iter().map(|&pos| &self.categories[pos]).collect()
    }

    fn subcategories(&self, id: CategoryId) -> Vec<&Category> {
        self.children
            .get(&id)
            .map(|positions| positions.iter().map(|&pos| &self.categories[pos]).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_forest() -> CategoryForest {
        CategoryForest::new(vec![
            Category::new(1, "Food"),
            Category::with_parent(2, "Groceries", 1),
            Category::with_parent(3, "Dining", 1),
            Category::with_parent(4, "Takeaway", 3),
            Category::new(5, "Income"),
        ])
        .unwrap()
    }

    #[test]
    fn test_roots_and_subcategories() {
        let forest = sample_forest();
        let roots: Vec<_> = forest.roots().iter().map(|c| c.name.clone()).collect();
        assert_eq!(roots, vec!["Food", "Income"]);

        let subs: Vec<_> = forest
            .subcategories(CategoryId::new(1))
            .iter()
            .map(|c| c.id.get())
            .collect();
        assert_eq!(subs, vec![2, 3]);
        assert!(forest.subcategories(CategoryId::new(5)).is_empty());
    }

    #[test]
    fn test_full_name() {
        let forest = sample_forest();
        assert_eq!(
            forest.full_name(CategoryId::new(4)).unwrap(),
            "Food:Dining:Takeaway"
        );
        assert_eq!(forest.full_name(CategoryId::new(5)).unwrap(), "Income");
        assert!(forest
            .full_name(CategoryId::new(99))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = CategoryForest::new(vec![Category::new(1, "Food"), Category::new(1, "Rent")])
            .unwrap_err();
        assert!(err.is_malformed_hierarchy());
    }

    #[test]
    fn test_missing_parent_rejected() {
        let err = CategoryForest::new(vec![Category::with_parent(2, "Orphan", 9)]).unwrap_err();
        assert!(err.is_malformed_hierarchy());
    }

    #[test]
    fn test_cycle_rejected() {
        let err = CategoryForest::new(vec![
            Category::new(1, "Root"),
            Category::with_parent(2, "A", 3),
            Category::with_parent(3, "B", 2),
        ])
        .unwrap_err();
        assert!(err.is_malformed_hierarchy());

        let err = CategoryForest::new(vec![Category::with_parent(7, "Loop", 7)]).unwrap_err();
        assert!(err.is_malformed_hierarchy());
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = CategoryForest::new(vec![Category::new(1, "  ")]).unwrap_err();
        assert!(matches!(err, RollupError::Validation(_)));
    }

    #[test]
    fn test_serialization() {
        let category = Category::with_parent(2, "Groceries", 1);
        let json = serde_json::to_string(&category).unwrap();
        let deserialized: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(category, deserialized);

        let root: Category = serde_json::from_str(r#"{"id": 1, "name": "Food"}"#).unwrap();
        assert_eq!(root.parent_id, None);
    }
}
