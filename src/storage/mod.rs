//! Storage layer for ledger-bridge
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. The import and export services receive a `&Storage` handle.

pub mod accounts;
pub mod categories;
pub mod file_io;
pub mod records;
pub mod transactions;

pub use accounts::AccountRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_bytes_atomic, write_json_atomic};
pub use records::{BudgetRepository, GoalRepository, RecordRepository, StoredRecord, SubscriptionRepository};
pub use transactions::TransactionRepository;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};

/// Map a poisoned-lock error into a storage error
pub(crate) fn lock_error<E: std::fmt::Display>(e: E) -> LedgerError {
    LedgerError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    pub accounts: AccountRepository,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    pub budgets: BudgetRepository,
    pub subscriptions: SubscriptionRepository,
    pub goals: GoalRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating its directories
    pub fn new(paths: LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: AccountRepository::new(paths.accounts_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            subscriptions: SubscriptionRepository::new(paths.subscriptions_file()),
            goals: GoalRepository::new(paths.goals_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Create a storage handle and load everything from disk
    pub fn open(paths: LedgerPaths) -> LedgerResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> LedgerResult<()> {
        self.accounts.load()?;
        self.transactions.load()?;
        self.categories.load()?;
        self.budgets.load()?;
        self.subscriptions.load()?;
        self.goals.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> LedgerResult<()> {
        self.accounts.save()?;
        self.transactions.save()?;
        self.categories.save()?;
        self.budgets.save()?;
        self.subscriptions.save()?;
        self.goals.save()?;
        Ok(())
    }

    /// Append a batch of entries to the audit log
    pub fn log_audit_batch(&self, entries: &[AuditEntry]) -> LedgerResult<()> {
        self.audit.log_batch(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.accounts.count().unwrap(), 0);
    }

    #[test]
    fn test_save_all_then_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let storage = Storage::open(paths.clone()).unwrap();
        storage
            .accounts
            .upsert(Account::new("Checking", AccountType::Checking, "USD"))
            .unwrap();
        storage.save_all().unwrap();

        let reopened = Storage::open(paths).unwrap();
        assert!(reopened.accounts.find_by_name("Checking").unwrap().is_some());
        assert!(temp_dir.path().join("data").join("goals.json").exists());
    }
}
