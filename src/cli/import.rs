//! CLI command handler for CSV import

use std::path::Path;

use crate::config::Settings;
use crate::error::LedgerResult;
use crate::import::{ImportResult, ImportService};
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    file: &Path,
) -> LedgerResult<ImportResult> {
    let result = ImportService::new(storage, settings).import_file(file)?;

    println!("Import of '{}'", file.display());
    println!("{}", "=".repeat(40));
    println!("  Imported:           {}", result.transactions_imported);
    println!("  Duplicates skipped: {}", result.duplicates_skipped);
    println!("  Accounts created:   {}", result.accounts_created);
    println!("  Categories created: {}", result.categories_created);

    if !result.errors.is_empty() {
        println!("  Errors:             {}", result.errors.len());
        for error in &result.errors {
            println!("    {}", error);
        }
    }

    Ok(result)
}
