//! Budget model
//!
//! A monthly spending limit, optionally tied to a category.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;

/// A spending limit for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub name: String,

    /// Amount that may be spent in the month
    pub limit_amount: Money,

    /// Amount spent so far
    pub spent_amount: Money,

    pub category_id: Option<CategoryId>,

    /// First day of the budgeted month
    pub month: NaiveDate,

    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Create a budget; `month` is normalized to the first day of its month
    pub fn new(name: impl Into<String>, limit_amount: Money, month: NaiveDate) -> Self {
        Self {
            id: BudgetId::new(),
            name: name.into(),
            limit_amount,
            spent_amount: Money::zero(),
            category_id: None,
            month: month.with_day(1).unwrap_or(month),
            created_at: Utc::now(),
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} of {}",
            self.month.format("%Y-%m"),
            self.name,
            self.spent_amount,
            self.limit_amount
        )
    }
}
