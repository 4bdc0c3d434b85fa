//! Subscription model
//!
//! Recurring charges such as streaming services or gym memberships.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId, SubscriptionId};
use super::money::Money;

/// How often a subscription bills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Quarterly => write!(f, "Quarterly"),
            Self::Yearly => write!(f, "Yearly"),
        }
    }
}

/// A recurring charge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,

    pub name: String,

    /// Amount charged per cycle
    pub amount: Money,

    pub billing_cycle: BillingCycle,

    pub next_due_date: NaiveDate,

    pub category_id: Option<CategoryId>,

    /// Account the charge is drawn from
    pub account_id: Option<AccountId>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Subscription {
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        billing_cycle: BillingCycle,
        next_due_date: NaiveDate,
    ) -> Self {
        Self {
            id: SubscriptionId::new(),
            name: name.into(),
            amount,
            billing_cycle,
            next_due_date,
            category_id: None,
            account_id: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.amount, self.billing_cycle)
    }
}
