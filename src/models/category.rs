//! Category model
//!
//! Categories group transactions for reporting. They are shared by many
//! transactions and created lazily the first time an import references them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::transaction::TransactionKind;

/// Which side of the ledger a category collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    /// Income transactions land in income categories, everything else in expense ones
    pub fn for_transaction(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense | TransactionKind::Transfer => Self::Expense,
        }
    }

    /// Icon given to categories created without one
    pub fn default_icon(&self) -> &'static str {
        match self {
            Self::Income => "banknote",
            Self::Expense => "cart",
        }
    }
}

/// A transaction category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name, unique within a store
    pub name: String,

    /// Display icon name
    pub icon: String,

    pub kind: CategoryKind,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category with the kind's default icon
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            icon: kind.default_icon().to_string(),
            kind,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
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
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_uses_default_icon() {
        let income = Category::new("Salary", CategoryKind::Income);
        assert_eq!(income.icon, "banknote");

        let expense = Category::new("Groceries", CategoryKind::Expense);
        assert_eq!(expense.icon, "cart");
    }

    #[test]
    fn test_kind_for_transaction() {
        assert_eq!(
            CategoryKind::for_transaction(TransactionKind::Income),
            CategoryKind::Income
        );
        assert_eq!(
            CategoryKind::for_transaction(TransactionKind::Transfer),
            CategoryKind::Expense
        );
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new("Dining", CategoryKind::Expense);
        assert!(category.validate().is_ok());

        category.name = String::new();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "x".repeat(51);
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        );
    }
}
