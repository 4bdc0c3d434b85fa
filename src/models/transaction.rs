//! Transaction model
//!
//! A transaction stores a non-negative amount; the direction of money flow is
//! carried by its [`TransactionKind`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId, TransactionId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
        }
    }

    /// Amount with the sign implied by the kind (expenses negative)
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Expense => -amount.abs(),
            _ => amount.abs(),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Short description (payee, merchant, ...)
    pub title: String,

    /// Magnitude of the transaction, never negative
    pub amount: Money,

    /// Date the transaction occurred on
    pub date: NaiveDate,

    pub kind: TransactionKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// The account this transaction is posted to
    pub account_id: AccountId,

    pub category_id: Option<CategoryId>,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction; a negative amount is stored as its magnitude
    pub fn new(
        title: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        kind: TransactionKind,
        account_id: AccountId,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            title: title.into(),
            amount: amount.abs(),
            date,
            kind,
            notes: None,
            account_id,
            category_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Amount with the sign implied by the kind
    pub fn signed_amount(&self) -> Money {
        self.kind.signed(self.amount)
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.title.trim().is_empty() {
            return Err(TransactionValidationError::EmptyTitle);
        }

        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount);
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date,
            self.title,
            self.signed_amount()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyTitle,
    NegativeAmount,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Transaction title cannot be empty"),
            Self::NegativeAmount => write!(f, "Transaction amount must not be negative"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_stores_magnitude() {
        let txn = Transaction::new(
            "Coffee",
            Money::from_cents(-450),
            date(2024, 1, 5),
            TransactionKind::Expense,
            AccountId::new(),
        );
        assert_eq!(txn.amount.cents(), 450);
        assert_eq!(txn.signed_amount().cents(), -450);
    }

    #[test]
    fn test_validation() {
        let mut txn = Transaction::new(
            "Paycheck",
            Money::from_cents(200000),
            date(2024, 1, 5),
            TransactionKind::Income,
            AccountId::new(),
        );
        assert!(txn.validate().is_ok());

        txn.title = " ".to_string();
        assert_eq!(txn.validate(), Err(TransactionValidationError::EmptyTitle));
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&TransactionKind::Transfer).unwrap();
        assert_eq!(json, "\"transfer\"");
    }

    #[test]
    fn test_serialization_skips_empty_notes() {
        let txn = Transaction::new(
            "Rent",
            Money::from_cents(120000),
            date(2024, 2, 1),
            TransactionKind::Expense,
            AccountId::new(),
        );
        let json = serde_json::to_string(&txn).unwrap();
        assert!(!json.contains("notes"));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, txn.id);
        assert_eq!(back.notes, None);
    }
}
