//! Account repository for JSON storage
//!
//! Manages loading and saving accounts to accounts.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Account, AccountId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

/// Serializable account data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AccountData {
    accounts: Vec<Account>,
}

/// Repository for account persistence
pub struct AccountRepository {
    path: PathBuf,
    data: RwLock<HashMap<AccountId, Account>>,
}

impl AccountRepository {
    /// Create a new account repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load accounts from disk
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: AccountData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;

        data.clear();
        for account in file_data.accounts {
            data.insert(account.id, account);
        }

        Ok(())
    }

    /// Save accounts to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let file_data = AccountData {
            accounts: self.get_all()?,
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> Result<Option<Account>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all accounts ordered by name
    pub fn get_all(&self) -> Result<Vec<Account>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut accounts: Vec<_> = data.values().cloned().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name).then(a.created_at.cmp(&b.created_at)));
        Ok(accounts)
    }

    /// Get an account by exact (trimmed, case-sensitive) name
    pub fn find_by_name(&self, name: &str) -> Result<Option<Account>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;

        let name = name.trim();
        Ok(data.values().find(|a| a.name == name).cloned())
    }

    /// Return the account named `name`, inserting the one built by `create` if
    /// none exists
    ///
    /// The lookup and the insert happen under one write lock, so two callers
    /// racing on the same name end up sharing a single account. The flag is
    /// true when a new account was inserted.
    pub fn get_or_insert_with<F>(&self, name: &str, create: F) -> Result<(Account, bool), LedgerError>
    where
        F: FnOnce(&str) -> Account,
    {
        let mut data = self.data.write().map_err(lock_error)?;

        let name = name.trim();
        if let Some(existing) = data.values().find(|a| a.name == name) {
            return Ok((existing.clone(), false));
        }

        let account = create(name);
        data.insert(account.id, account.clone());
        Ok((account, true))
    }

    /// Insert or update an account
    pub fn upsert(&self, account: Account) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;

        data.insert(account.id, account);
        Ok(())
    }

    /// Count accounts
    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
