//! Savings goal model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// A savings target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,

    pub name: String,

    pub target_amount: Money,

    pub current_amount: Money,

    pub target_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_amount: Money) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into(),
            target_amount,
            current_amount: Money::zero(),
            target_date: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    /// Fraction of the target reached, clamped to `0.0..=1.0`
    ///
    /// A goal with a non-positive target reports zero progress.
    pub fn progress(&self) -> f64 {
        if !self.target_amount.is_positive() {
            return 0.0;
        }
        let ratio = self.current_amount.cents() as f64 / self.target_amount.cents() as f64;
        ratio.clamp(0.0, 1.0)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} ({:.0}%)",
            self.name,
            self.current_amount,
            self.target_amount,
            self.progress() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let mut goal = Goal::new("Vacation", Money::from_cents(200000));
        assert_eq!(goal.progress(), 0.0);

        goal.current_amount = Money::from_cents(50000);
        assert!((goal.progress() - 0.25).abs() < f64::EPSILON);

        goal.current_amount = Money::from_cents(300000);
        assert_eq!(goal.progress(), 1.0);
    }

    #[test]
    fn test_zero_target_has_no_progress() {
        let mut goal = Goal::new("Nothing", Money::zero());
        goal.current_amount = Money::from_cents(100);
        assert_eq!(goal.progress(), 0.0);
    }

    #[test]
    fn test_display() {
        let mut goal = Goal::new("Emergency Fund", Money::from_cents(100000));
        goal.current_amount = Money::from_cents(50000);
        assert_eq!(format!("{}", goal), "Emergency Fund: $500.00 of $1000.00 (50%)");
    }
}
