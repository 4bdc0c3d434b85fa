//! Duplicate detection against stored transactions

use chrono::NaiveDate;

use crate::error::LedgerResult;
use crate::models::Money;
use crate::storage::Storage;

/// The fields a duplicate must match exactly
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub title: &'a str,
    /// Magnitude, as stored on the transaction
    pub amount: Money,
    pub date: NaiveDate,
}

/// True if a stored transaction has the same title, amount and date
///
/// Transactions committed earlier in the same import are in the store and
/// count as existing records.
pub fn is_duplicate(storage: &Storage, candidate: &Candidate<'_>) -> LedgerResult<bool> {
    Ok(storage
        .transactions
        .find_exact(candidate.title, candidate.amount.abs(), candidate.date)?
        .is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{AccountId, Transaction, TransactionKind};
    use tempfile::TempDir;

    #[test]
    fn test_exact_match_only() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(LedgerPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        storage
            .transactions
            .upsert(Transaction::new(
                "Coffee",
                Money::from_cents(-450),
                date,
                TransactionKind::Expense,
                AccountId::new(),
            ))
            .unwrap();

        let same = Candidate {
            title: "Coffee",
            amount: Money::from_cents(450),
            date,
        };
        assert!(is_duplicate(&storage, &same).unwrap());

        let other_title = Candidate {
            title: "Coffee ",
            ..same
        };
        assert!(!is_duplicate(&storage, &other_title).unwrap());

        let other_amount = Candidate {
            amount: Money::from_cents(451),
            ..same
        };
        assert!(!is_duplicate(&storage, &other_amount).unwrap());
    }
}
