//! User settings for ledger-bridge
//!
//! Manages import defaults (currency, fallback entity names) and the choice of
//! report rendering backend.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;

/// Which backend renders the paginated report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportBackend {
    /// Paginated plain-text document
    #[default]
    Text,
    /// No renderer on this host; report exports fail
    Unavailable,
}

/// User settings for ledger-bridge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency code given to accounts created during import
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Account used when a row names no account
    #[serde(default = "default_account_name")]
    pub default_account_name: String,

    /// Category used for income rows that name no category
    #[serde(default = "default_income_category")]
    pub default_income_category: String,

    /// Category used for expense and transfer rows that name no category
    #[serde(default = "default_expense_category")]
    pub default_expense_category: String,

    #[serde(default)]
    pub report_backend: ReportBackend,

    /// Body lines per report page
    #[serde(default = "default_report_lines_per_page")]
    pub report_lines_per_page: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_account_name() -> String {
    "Imported Account".to_string()
}

fn default_income_category() -> String {
    "Other Income".to_string()
}

fn default_expense_category() -> String {
    "Other Expenses".to_string()
}

fn default_report_lines_per_page() -> usize {
    60
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_currency: default_currency(),
            default_account_name: default_account_name(),
            default_income_category: default_income_category(),
            default_expense_category: default_expense_category(),
            report_backend: ReportBackend::default(),
            report_lines_per_page: default_report_lines_per_page(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
