//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::LedgerError;
use crate::models::{Money, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with a date index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: date -> transaction_ids
    by_date: RwLock<BTreeMap<NaiveDate, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_date: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load transactions from disk and build the date index
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_date = self.by_date.write().map_err(lock_error)?;

        data.clear();
        by_date.clear();

        for txn in file_data.transactions {
            by_date.entry(txn.date).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let file_data = TransactionData {
            transactions: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, oldest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_chronologically(&mut transactions);
        Ok(transactions)
    }

    /// Get transactions dated within `start..=end`, oldest first
    pub fn get_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, LedgerError> {
        if start > end {
            return Ok(Vec::new());
        }

        let data = self.data.read().map_err(lock_error)?;
        let by_date = self.by_date.read().map_err(lock_error)?;

        let mut transactions: Vec<_> = by_date
            .range(start..=end)
            .flat_map(|(_, ids)| ids.iter())
            .filter_map(|id| data.get(id).cloned())
            .collect();
        sort_chronologically(&mut transactions);
        Ok(transactions)
    }

    /// Find a transaction with exactly this title, amount and date
    pub fn find_exact(
        &self,
        title: &str,
        amount: Money,
        date: NaiveDate,
    ) -> Result<Option<Transaction>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        let by_date = self.by_date.read().map_err(lock_error)?;

        Ok(by_date
            .get(&date)
            .into_iter()
            .flatten()
            .filter_map(|id| data.get(id))
            .find(|t| t.title == title && t.amount == amount)
            .cloned())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_date = self.by_date.write().map_err(lock_error)?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_date.get_mut(&old.date) {
                ids.retain(|id| *id != txn.id);
            }
        }

        by_date.entry(txn.date).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

fn sort_chronologically(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
}
