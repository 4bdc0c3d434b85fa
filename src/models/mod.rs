//! Core data models for ledger-bridge
//!
//! This module contains the normalized record model the import pipeline
//! produces and the export engine serializes: accounts, transactions,
//! categories, budgets, subscriptions and goals.

pub mod account;
pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod subscription;
pub mod transaction;

pub use account::{Account, AccountType};
pub use budget::Budget;
pub use category::{Category, CategoryKind};
pub use goal::Goal;
pub use ids::{AccountId, BudgetId, CategoryId, GoalId, SubscriptionId, TransactionId};
pub use money::Money;
pub use subscription::{BillingCycle, Subscription};
pub use transaction::{Transaction, TransactionKind};
