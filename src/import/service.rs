//! CSV import orchestration
//!
//! Reads the header once to build a [`ColumnMapping`], then processes each
//! data row independently. Row-level problems are collected into the
//! [`ImportResult`]; storage failures abort the import.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::audit::{AuditEntry, EntityType};
use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, Transaction};
use crate::storage::Storage;

use super::duplicates::{is_duplicate, Candidate};
use super::mapping::{ColumnMapping, Field};
use super::parsers::{classify_kind, parse_amount, parse_date};
use super::resolver::EntityResolver;
use super::tokenizer::{is_blank, read_records};

/// A problem with one data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRowError {
    /// 1-based position among non-blank records; the header is row 1
    pub row: usize,
    pub message: String,
}

impl fmt::Display for ImportRowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

/// Outcome of an import run
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// True when no row produced an error
    pub success: bool,
    pub transactions_imported: usize,
    pub duplicates_skipped: usize,
    pub errors: Vec<ImportRowError>,
    pub accounts_created: usize,
    pub categories_created: usize,
}

impl fmt::Display for ImportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Imported {} transaction(s), skipped {} duplicate(s), {} error(s)",
            self.transactions_imported,
            self.duplicates_skipped,
            self.errors.len()
        )
    }
}

enum RowOutcome {
    Imported,
    Duplicate,
}

/// Service for importing CSV transactions into a store
pub struct ImportService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Import a CSV file
    ///
    /// Failure to open or read the file is reported as
    /// [`LedgerError::FileAccessDenied`]. Invalid UTF-8 is replaced rather
    /// than rejected.
    pub fn import_file(&self, path: &Path) -> LedgerResult<ImportResult> {
        let bytes = fs::read(path).map_err(|e| LedgerError::FileAccessDenied {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), "importing file");
        self.import_str(&String::from_utf8_lossy(&bytes))
    }

    /// Import CSV text whose first non-blank record is the header
    pub fn import_str(&self, text: &str) -> LedgerResult<ImportResult> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut records = read_records(text)
            .into_iter()
            .filter(|record| !is_blank(record));

        let header = records.next().ok_or(LedgerError::EmptyFile)?;
        let mapping = ColumnMapping::from_headers(&header);
        tracing::debug!(?mapping, "built column mapping");

        let resolver = EntityResolver::new(self.storage, self.settings);
        let mut result = ImportResult::default();
        let mut audit = Vec::new();

        for (offset, row) in records.enumerate() {
            let row_number = offset + 2;

            match self.import_row(&row, &mapping, &resolver, &mut result, &mut audit) {
                Ok(RowOutcome::Imported) => {
                    tracing::debug!(row = row_number, "imported row");
                    result.transactions_imported += 1;
                }
                Ok(RowOutcome::Duplicate) => {
                    tracing::debug!(row = row_number, "skipped duplicate row");
                    result.duplicates_skipped += 1;
                }
                Err(e) if e.is_row_recoverable() => {
                    tracing::warn!(row = row_number, error = %e, "row rejected");
                    result.errors.push(ImportRowError {
                        row: row_number,
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::error!(row = row_number, error = %e, "import aborted");
                    return Err(e);
                }
            }
        }

        self.storage.save_all()?;
        self.storage.log_audit_batch(&audit)?;

        result.success = result.errors.is_empty();
        tracing::info!(
            imported = result.transactions_imported,
            duplicates = result.duplicates_skipped,
            errors = result.errors.len(),
            "import finished"
        );

        Ok(result)
    }

    fn import_row(
        &self,
        row: &[String],
        mapping: &ColumnMapping,
        resolver: &EntityResolver<'_>,
        result: &mut ImportResult,
        audit: &mut Vec<AuditEntry>,
    ) -> LedgerResult<RowOutcome> {
        let date_raw = required_cell(row, mapping, Field::Date)?;
        let title = required_cell(row, mapping, Field::Title)?;
        let amount_raw = required_cell(row, mapping, Field::Amount)?;

        let date = parse_date(date_raw)?;
        let signed = parse_amount(amount_raw)?;
        let kind = classify_kind(mapping.value(row, Field::Kind), signed);

        let account = resolver.get_or_create_account(row, mapping)?;
        if account.created {
            result.accounts_created += 1;
            audit.push(AuditEntry::create(
                EntityType::Account,
                account.entity.id.to_string(),
                Some(account.entity.name.clone()),
                &account.entity,
            ));
        }

        let category = resolver.get_or_create_category(row, mapping, kind)?;
        if category.created {
            result.categories_created += 1;
            audit.push(AuditEntry::create(
                EntityType::Category,
                category.entity.id.to_string(),
                Some(category.entity.name.clone()),
                &category.entity,
            ));
        }

        let notes = mapping.value(row, Field::Notes).map(str::to_string);

        let candidate = Candidate {
            title,
            amount: signed.abs(),
            date,
        };
        if is_duplicate(self.storage, &candidate)? {
            return Ok(RowOutcome::Duplicate);
        }

        let txn = Transaction::new(title, signed, date, kind, account.entity.id)
            .with_category(Some(category.entity.id))
            .with_notes(notes);
        txn.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        let posting = self.post_to_account(&txn)?;
        self.storage.transactions.upsert(txn.clone())?;
        if let Some((before, after)) = posting {
            self.storage.accounts.upsert(after.clone())?;
            audit.push(AuditEntry::update(
                EntityType::Account,
                after.id.to_string(),
                Some(after.name.clone()),
                &before,
                &after,
            ));
        }

        audit.push(AuditEntry::create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.title.clone()),
            &txn,
        ));

        Ok(RowOutcome::Imported)
    }

    /// Account state before and after `txn`, or `None` when the balance does
    /// not move. Nothing is stored here so a rejected row leaves no trace.
    fn post_to_account(&self, txn: &Transaction) -> LedgerResult<Option<(Account, Account)>> {
        let before = self
            .storage
            .accounts
            .get(txn.account_id)?
            .ok_or_else(|| LedgerError::Storage(format!("Account {} vanished", txn.account_id)))?;

        let mut after = before.clone();
        after
            .apply_transaction(txn.kind, txn.amount)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        if after.balance == before.balance {
            return Ok(None);
        }
        Ok(Some((before, after)))
    }
}

/// Trimmed cell for a required field, failing when the column is unmapped,
/// the row is too short to contain it, or the cell is empty
fn required_cell<'r>(
    row: &'r [String],
    mapping: &ColumnMapping,
    field: Field,
) -> LedgerResult<&'r str> {
    mapping
        .value(row, field)
        .ok_or_else(|| LedgerError::MissingRequiredField(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{Money, TransactionKind};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn import(storage: &Storage, csv: &str) -> ImportResult {
        let settings = Settings::default();
        ImportService::new(storage, &settings).import_str(csv).unwrap()
    }

    #[test]
    fn test_coffee_and_paycheck() {
        let (_temp, storage) = create_test_storage();

        let result = import(
            &storage,
            "date,title,amount\n2024-01-05,Coffee,-4.50\n2024-01-06,Paycheck,2000.00\n",
        );

        assert!(result.success);
        assert_eq!(result.transactions_imported, 2);
        assert_eq!(result.accounts_created, 1);

        let txns = storage.transactions.get_all().unwrap();
        assert_eq!(txns[0].title, "Coffee");
        assert_eq!(txns[0].kind, TransactionKind::Expense);
        assert_eq!(txns[0].amount, Money::from_cents(450));
        assert_eq!(txns[1].kind, TransactionKind::Income);

        let accounts = storage.accounts.get_all().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name, "Imported Account");
        assert_eq!(accounts[0].balance, Money::from_cents(199_550));
    }

    #[test]
    fn test_header_only() {
        let (_temp, storage) = create_test_storage();

        let result = import(&storage, "date,title,amount\n");

        assert!(result.success);
        assert_eq!(result.transactions_imported, 0);
        assert_eq!(result.duplicates_skipped, 0);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_empty_input_is_fatal() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let service = ImportService::new(&storage, &settings);

        assert!(matches!(service.import_str(""), Err(LedgerError::EmptyFile)));
        assert!(matches!(service.import_str("\n  \n"), Err(LedgerError::EmptyFile)));
    }

    #[test]
    fn test_same_row_twice_is_duplicate() {
        let (_temp, storage) = create_test_storage();

        let result = import(
            &storage,
            "date,title,amount\n2024-01-05,Coffee,-4.50\n2024-01-05,Coffee,-4.50\n",
        );

        assert!(result.success);
        assert_eq!(result.transactions_imported, 1);
        assert_eq!(result.duplicates_skipped, 1);
        assert_eq!(storage.transactions.count().unwrap(), 1);
    }

    #[test]
    fn test_reimport_skips_everything() {
        let (_temp, storage) = create_test_storage();
        let csv = "date,title,amount\n2024-01-05,Coffee,-4.50\n2024-01-06,Lunch,-12.00\n";

        import(&storage, csv);
        let again = import(&storage, csv);

        assert_eq!(again.transactions_imported, 0);
        assert_eq!(again.duplicates_skipped, 2);
        assert_eq!(again.accounts_created, 0);
        assert_eq!(storage.accounts.count().unwrap(), 1);
    }

    #[test]
    fn test_one_bad_date_among_five_rows() {
        let (_temp, storage) = create_test_storage();

        let result = import(
            &storage,
            "date,title,amount\n\
             2024-01-01,A,1.00\n\
             2024-01-02,B,2.00\n\
             not-a-date,C,3.00\n\
             2024-01-04,D,4.00\n\
             2024-01-05,E,5.00\n",
        );

        assert!(!result.success);
        assert_eq!(result.transactions_imported, 4);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].row, 4);
        assert_eq!(
            result.errors[0].to_string(),
            "Row 4: Invalid date format: 'not-a-date'"
        );
    }

    #[test]
    fn test_blank_lines_do_not_shift_row_numbers() {
        let (_temp, storage) = create_test_storage();

        let result = import(
            &storage,
            "date,title,amount\n\n2024-01-01,A,1.00\n   \n2024-01-02,B,oops\n",
        );

        assert_eq!(result.transactions_imported, 1);
        assert_eq!(result.errors[0].row, 3);
    }

    #[test]
    fn test_missing_required_columns() {
        let (_temp, storage) = create_test_storage();

        let result = import(
            &storage,
            "date,title,amount\n2024-01-01,,1.00\n2024-01-02,Short\n",
        );

        assert_eq!(result.transactions_imported, 0);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].message, "Missing required field: title");
        assert_eq!(result.errors[1].message, "Missing required field: amount");
    }

    #[test]
    fn test_separator_only_row_is_an_error() {
        let (_temp, storage) = create_test_storage();

        let result = import(&storage, "date,title,amount\n,,\n2024-01-02,B,1\n");

        assert_eq!(result.transactions_imported, 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[0].to_string(),
            "Row 2: Missing required field: date"
        );
    }

    #[test]
    fn test_sub_cent_amounts_are_rejected() {
        let (_temp, storage) = create_test_storage();

        let result = import(
            &storage,
            "date,title,amount\n2024-01-01,B,4.501\n2024-01-01,B,4.50\n2024-01-01,C,0.004\n",
        );

        assert_eq!(result.transactions_imported, 1);
        assert_eq!(result.duplicates_skipped, 0);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].to_string(), "Row 2: Invalid amount format: '4.501'");
        assert_eq!(result.errors[1].to_string(), "Row 4: Invalid amount format: '0.004'");

        let txns = storage.transactions.get_all().unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, Money::from_cents(450));
    }

    #[test]
    fn test_balance_overflow_rejects_row_and_continues() {
        let (_temp, storage) = create_test_storage();

        let result = import(
            &storage,
            "date,title,amount\n\
             2024-01-01,A,90000000000000000.00\n\
             2024-01-02,B,90000000000000000.00\n\
             2024-01-03,C,-1.00\n",
        );

        assert_eq!(result.transactions_imported, 2);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].row, 3);
        assert!(result.errors[0].message.contains("out of range"));

        let titles: Vec<_> = storage
            .transactions
            .get_all()
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["A", "C"]);

        let account = &storage.accounts.get_all().unwrap()[0];
        assert_eq!(account.balance.cents(), 9_000_000_000_000_000_000 - 100);
    }

    #[test]
    fn test_unmapped_amount_column_fails_every_row() {
        let (_temp, storage) = create_test_storage();

        let result = import(&storage, "date,title\n2024-01-01,A\n2024-01-02,B\n");

        assert_eq!(result.errors.len(), 2);
        assert!(result.errors.iter().all(|e| e.message.contains("amount")));
    }

    #[test]
    fn test_full_header_with_kind_account_category_notes() {
        let (_temp, storage) = create_test_storage();

        let result = import(
            &storage,
            "Date,Description,Amount,Type,Account,Category,Memo\n\
             01/15/2024,\"Smith, John\",\"$1,234.56\",credit,Savings,Gifts,birthday\n\
             01/16/2024,Grocer,(20.00),,Savings,Food,\n\
             01/17/2024,Move,100.00,transfer,Savings,,\n",
        );

        assert!(result.success, "{:?}", result.errors);
        assert_eq!(result.transactions_imported, 3);
        assert_eq!(result.accounts_created, 1);

        let txns = storage.transactions.get_all().unwrap();
        assert_eq!(txns[0].title, "Smith, John");
        assert_eq!(txns[0].amount, Money::from_cents(123_456));
        assert_eq!(txns[0].kind, TransactionKind::Income);
        assert_eq!(txns[0].notes.as_deref(), Some("birthday"));
        assert_eq!(txns[1].kind, TransactionKind::Expense);
        assert_eq!(txns[1].notes, None);
        assert_eq!(txns[2].kind, TransactionKind::Transfer);

        let food = storage.categories.find_by_name("Food").unwrap().unwrap();
        assert_eq!(txns[1].category_id, Some(food.id));
        assert!(storage.categories.find_by_name("Other Expenses").unwrap().is_some());

        // Transfers do not move the balance
        let savings = storage.accounts.find_by_name("Savings").unwrap().unwrap();
        assert_eq!(savings.balance, Money::from_cents(121_456));
    }

    #[test]
    fn test_import_persists_and_audits() {
        let (temp, storage) = create_test_storage();

        import(&storage, "date,title,amount\n2024-01-05,Coffee,-4.50\n");

        let paths = LedgerPaths::with_base_dir(temp.path().to_path_buf());
        let reopened = Storage::open(paths).unwrap();
        assert_eq!(reopened.transactions.count().unwrap(), 1);

        let entries: Vec<AuditEntry> = std::fs::read_to_string(storage.paths().audit_log())
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        let types: Vec<_> = entries.iter().map(|e| e.entity_type).collect();
        assert!(types.contains(&EntityType::Account));
        assert!(types.contains(&EntityType::Category));
        assert!(types.contains(&EntityType::Transaction));
    }

    #[test]
    fn test_import_file_missing_is_access_denied() {
        let (temp, storage) = create_test_storage();
        let settings = Settings::default();
        let service = ImportService::new(&storage, &settings);

        let result = service.import_file(&temp.path().join("nope.csv"));
        assert!(matches!(result, Err(LedgerError::FileAccessDenied { .. })));
    }

    #[test]
    fn test_import_file_with_bom() {
        let (temp, storage) = create_test_storage();
        let settings = Settings::default();
        let path = temp.path().join("bank.csv");
        fs::write(&path, "\u{feff}Date,Title,Amount\n2024-01-05,Coffee,-4.50\n").unwrap();

        let result = ImportService::new(&storage, &settings)
            .import_file(&path)
            .unwrap();
        assert_eq!(result.transactions_imported, 1);
    }
}
