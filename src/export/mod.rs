//! Export engine
//!
//! Gathers records from storage for a date range and serializes them as:
//! - CSV: one section per record type, spreadsheet-compatible
//! - JSON: typed records under an `exportInfo` header
//! - Report: a paginated summary document, rendered by a [`ReportRenderer`]

pub mod csv;
pub mod json;
pub mod report;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountId, Budget, CategoryId, Goal, Subscription, Transaction};
use crate::storage::{write_bytes_atomic, Storage};

pub use report::{renderer_for, ReportRenderer, ReportSummary, TextReportRenderer, UnavailableRenderer};

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Report,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Report => "txt",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "report" | "pdf" | "txt" => Ok(Self::Report),
            other => Err(LedgerError::InvalidSettings(format!(
                "Unknown export format '{}'",
                other
            ))),
        }
    }
}

/// What to export and for which dates
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub format: ExportFormat,
    /// Inclusive
    pub start_date: NaiveDate,
    /// Inclusive
    pub end_date: NaiveDate,
    pub include_transactions: bool,
    pub include_accounts: bool,
    pub include_budgets: bool,
    pub include_subscriptions: bool,
    pub include_goals: bool,
}

impl ExportSettings {
    /// Settings including every record type
    pub fn all(format: ExportFormat, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            format,
            start_date,
            end_date,
            include_transactions: true,
            include_accounts: true,
            include_budgets: true,
            include_subscriptions: true,
            include_goals: true,
        }
    }

    pub fn validate(&self) -> LedgerResult<()> {
        if self.start_date > self.end_date {
            return Err(LedgerError::InvalidSettings(format!(
                "start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }

        if !(self.include_transactions
            || self.include_accounts
            || self.include_budgets
            || self.include_subscriptions
            || self.include_goals)
        {
            return Err(LedgerError::InvalidSettings(
                "nothing selected for export".into(),
            ));
        }

        Ok(())
    }
}

/// Records selected for one export, with name lookups for references
///
/// A `None` section was not requested; `Some(vec![])` was requested but is
/// empty.
#[derive(Debug, Clone, Default)]
pub struct ExportSnapshot {
    pub transactions: Option<Vec<Transaction>>,
    pub accounts: Option<Vec<Account>>,
    pub budgets: Option<Vec<Budget>>,
    pub subscriptions: Option<Vec<Subscription>>,
    pub goals: Option<Vec<Goal>>,
    account_names: HashMap<AccountId, String>,
    category_names: HashMap<CategoryId, String>,
}

impl ExportSnapshot {
    /// Query storage for everything `settings` asks for
    ///
    /// Only transactions are filtered by the date range.
    pub fn collect(storage: &Storage, settings: &ExportSettings) -> LedgerResult<Self> {
        let accounts = storage.accounts.get_all()?;
        let categories = storage.categories.get_all()?;

        Ok(Self {
            transactions: settings
                .include_transactions
                .then(|| storage.transactions.get_in_range(settings.start_date, settings.end_date))
                .transpose()?,
            budgets: settings
                .include_budgets
                .then(|| storage.budgets.get_all())
                .transpose()?,
            subscriptions: settings
                .include_subscriptions
                .then(|| storage.subscriptions.get_all())
                .transpose()?,
            goals: settings
                .include_goals
                .then(|| storage.goals.get_all())
                .transpose()?,
            account_names: accounts.iter().map(|a| (a.id, a.name.clone())).collect(),
            category_names: categories.iter().map(|c| (c.id, c.name.clone())).collect(),
            accounts: settings.include_accounts.then_some(accounts),
        })
    }

    /// Name of an account, empty when unknown
    pub fn account_name(&self, id: Option<AccountId>) -> &str {
        id.and_then(|id| self.account_names.get(&id))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Name of a category, empty when unknown
    pub fn category_name(&self, id: Option<CategoryId>) -> &str {
        id.and_then(|id| self.category_names.get(&id))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Service producing export documents and files
pub struct ExportService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
    clock: &'a dyn Clock,
}

impl<'a> ExportService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings, clock: &'a dyn Clock) -> Self {
        Self {
            storage,
            settings,
            clock,
        }
    }

    /// Produce the export document in memory
    pub fn render(&self, export: &ExportSettings) -> LedgerResult<Vec<u8>> {
        export.validate()?;
        let snapshot = ExportSnapshot::collect(self.storage, export)?;

        match export.format {
            ExportFormat::Csv => Ok(csv::render(&snapshot).into_bytes()),
            ExportFormat::Json => json::render(&snapshot, export, self.clock.now()),
            ExportFormat::Report => {
                let summary = ReportSummary::build(self.storage, &snapshot, export, self.clock.now())?;
                renderer_for(self.settings).render(&summary)
            }
        }
    }

    /// Write the export into `destination_dir` and return the file path
    ///
    /// Nothing is written if rendering fails; a failed write leaves no
    /// partial file behind.
    pub fn export(&self, export: &ExportSettings, destination_dir: &Path) -> LedgerResult<PathBuf> {
        let bytes = self.render(export)?;

        let file_name = format!(
            "ledger-export-{}.{}",
            self.clock.now().format("%Y%m%d-%H%M%S"),
            export.format.extension()
        );
        let path = destination_dir.join(file_name);

        write_bytes_atomic(&path, &bytes)
            .map_err(|e| LedgerError::FileCreationFailed(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            path = %path.display(),
            format = %export.format,
            bytes = bytes.len(),
            "export written"
        );
        Ok(path)
    }
}
