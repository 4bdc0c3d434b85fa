//! Account model
//!
//! Represents financial accounts (checking, savings, credit cards, etc.) with a
//! running balance maintained by the transactions posted against them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;
use super::transaction::TransactionKind;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    Credit,
    Cash,
    Investment,
    Other,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::Credit => write!(f, "Credit Card"),
            Self::Cash => write!(f, "Cash"),
            Self::Investment => write!(f, "Investment"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A financial account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name, unique within a store
    pub name: String,

    /// Type of account
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Running balance
    pub balance: Money,

    /// ISO-4217 currency code
    pub currency: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last modified
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(name: impl Into<String>, account_type: AccountType, currency: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            balance: Money::zero(),
            currency: currency.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new account with an opening balance
    pub fn with_balance(
        name: impl Into<String>,
        account_type: AccountType,
        currency: impl Into<String>,
        balance: Money,
    ) -> Self {
        let mut account = Self::new(name, account_type, currency);
        account.balance = balance;
        account
    }

    /// Post a transaction's effect on the balance
    ///
    /// `amount` is the non-negative magnitude. Income credits, expense debits,
    /// and a transfer leaves the balance unchanged since only one side of it
    /// is known.
    /// The balance is left untouched when the result would not fit.
    pub fn apply_transaction(
        &mut self,
        kind: TransactionKind,
        amount: Money,
    ) -> Result<(), AccountValidationError> {
        let balance = match kind {
            TransactionKind::Income => self.balance.checked_add(amount),
            TransactionKind::Expense => self.balance.checked_sub(amount),
            TransactionKind::Transfer => return Ok(()),
        };
        self.balance = balance.ok_or(AccountValidationError::BalanceOverflow)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    BalanceOverflow,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
            Self::BalanceOverflow => write!(f, "Account balance out of range"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = Account::new("Checking", AccountType::Checking, "USD");
        assert_eq!(account.name, "Checking");
        assert_eq!(account.account_type, AccountType::Checking);
        assert_eq!(account.balance, Money::zero());
        assert_eq!(account.currency, "USD");
    }

    #[test]
    fn test_apply_transaction() {
        let mut account = Account::new("Checking", AccountType::Checking, "USD");

        account
            .apply_transaction(TransactionKind::Income, Money::from_cents(200000))
            .unwrap();
        assert_eq!(account.balance.cents(), 200000);

        account
            .apply_transaction(TransactionKind::Expense, Money::from_cents(450))
            .unwrap();
        assert_eq!(account.balance.cents(), 199550);

        account
            .apply_transaction(TransactionKind::Transfer, Money::from_cents(1000))
            .unwrap();
        assert_eq!(account.balance.cents(), 199550);
    }

    #[test]
    fn test_apply_transaction_overflow_keeps_balance() {
        let start = Money::from_cents(i64::MAX - 5);
        let mut account = Account::with_balance("Big", AccountType::Savings, "USD", start);

        assert_eq!(
            account.apply_transaction(TransactionKind::Income, Money::from_cents(6)),
            Err(AccountValidationError::BalanceOverflow)
        );
        assert_eq!(account.balance, start);

        account.balance = Money::from_cents(-start.cents());
        assert_eq!(
            account.apply_transaction(TransactionKind::Expense, Money::from_cents(i64::MAX)),
            Err(AccountValidationError::BalanceOverflow)
        );
    }

    #[test]
    fn test_validation() {
        let mut account = Account::new("Valid Name", AccountType::Checking, "USD");
        assert!(account.validate().is_ok());

        account.name = "   ".to_string();
        assert_eq!(account.validate(), Err(AccountValidationError::EmptyName));

        account.name = "a".repeat(101);
        assert!(matches!(
            account.validate(),
            Err(AccountValidationError::NameTooLong(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let account = Account::with_balance("Test", AccountType::Savings, "EUR", Money::from_cents(500));
        let json = serde_json::to_string(&account).unwrap();
        assert!(json.contains("\"type\":\"savings\""));
        let deserialized: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(account.id, deserialized.id);
        assert_eq!(deserialized.balance.cents(), 500);
    }
}
