//! Generic repository for budgets, subscriptions and goals
//!
//! These records are only read by the export engine, so a single
//! id-keyed repository covers all three files.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::LedgerError;
use crate::models::{Budget, BudgetId, Goal, GoalId, Subscription, SubscriptionId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

/// A record that can be kept in a [`RecordRepository`]
pub trait StoredRecord: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash;

    fn record_id(&self) -> Self::Id;

    /// Name used for ordering in `get_all`
    fn display_name(&self) -> &str;
}

impl StoredRecord for Budget {
    type Id = BudgetId;

    fn record_id(&self) -> BudgetId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl StoredRecord for Subscription {
    type Id = SubscriptionId;

    fn record_id(&self) -> SubscriptionId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl StoredRecord for Goal {
    type Id = GoalId;

    fn record_id(&self) -> GoalId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Repository persisting a JSON array of records
pub struct RecordRepository<T: StoredRecord> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

pub type BudgetRepository = RecordRepository<Budget>;
pub type SubscriptionRepository = RecordRepository<Subscription>;
pub type GoalRepository = RecordRepository<Goal>;

impl<T: StoredRecord> RecordRepository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), LedgerError> {
        let records: Vec<T> = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        for record in records {
            data.insert(record.record_id(), record);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        write_json_atomic(&self.path, &self.get_all()?)
    }

    pub fn get(&self, id: T::Id) -> Result<Option<T>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all records ordered by name
    pub fn get_all(&self) -> Result<Vec<T>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut records: Vec<_> = data.values().cloned().collect();
        records.sort_by(|a, b| a.display_name().cmp(b.display_name()));
        Ok(records)
    }

    pub fn upsert(&self, record: T) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(record.record_id(), record);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
