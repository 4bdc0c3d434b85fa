//! Get-or-create resolution of accounts and categories named by import rows

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountType, Category, CategoryKind, TransactionKind};
use crate::storage::Storage;

use super::mapping::{ColumnMapping, Field};

/// An entity returned by the resolver, flagged when it was just created
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub entity: T,
    pub created: bool,
}

/// Looks up accounts and categories by exact name, creating them on first use
///
/// The lookup and the insert run under the repository's write lock, so the
/// same name always resolves to one entity.
pub struct EntityResolver<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> EntityResolver<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Resolve the account named by the row, or the default import account
    pub fn get_or_create_account(
        &self,
        row: &[String],
        mapping: &ColumnMapping,
    ) -> LedgerResult<Resolved<Account>> {
        let name = mapping
            .value(row, Field::Account)
            .unwrap_or(self.settings.default_account_name.as_str());
        self.account_named(name)
    }

    /// Resolve the category named by the row, or the default for `kind`
    pub fn get_or_create_category(
        &self,
        row: &[String],
        mapping: &ColumnMapping,
        kind: TransactionKind,
    ) -> LedgerResult<Resolved<Category>> {
        let name = mapping
            .value(row, Field::Category)
            .unwrap_or_else(|| self.default_category_name(kind));
        self.category_named(name, CategoryKind::for_transaction(kind))
    }

    pub fn account_named(&self, name: &str) -> LedgerResult<Resolved<Account>> {
        let prototype = Account::new(
            name.trim(),
            AccountType::default(),
            self.settings.default_currency.as_str(),
        );
        prototype
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let (entity, created) = self
            .storage
            .accounts
            .get_or_insert_with(name, |_| prototype)?;

        if created {
            tracing::info!(account = %entity.name, id = %entity.id, "created account");
        }
        Ok(Resolved { entity, created })
    }

    /// Resolve a category by name; `kind` only applies when it is created
    pub fn category_named(&self, name: &str, kind: CategoryKind) -> LedgerResult<Resolved<Category>> {
        let prototype = Category::new(name.trim(), kind);
        prototype
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let (entity, created) = self
            .storage
            .categories
            .get_or_insert_with(name, |_| prototype)?;

        if created {
            tracing::info!(category = %entity.name, id = %entity.id, "created category");
        }
        Ok(Resolved { entity, created })
    }

    fn default_category_name(&self, kind: TransactionKind) -> &str {
        match kind {
            TransactionKind::Income => &self.settings.default_income_category,
            TransactionKind::Expense | TransactionKind::Transfer => {
                &self.settings.default_expense_category
            }
        }
    }
}
