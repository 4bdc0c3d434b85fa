//! Custom error types for ledger-bridge
//!
//! This module defines the error hierarchy for the import/export pipeline using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for ledger-bridge operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// The import source could not be opened or read
    #[error("Access denied to {path}: {reason}")]
    FileAccessDenied { path: String, reason: String },

    /// The import source has no records at all
    #[error("The file is empty")]
    EmptyFile,

    /// A row lacks a column the importer cannot do without
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Invalid date format: '{0}'")]
    InvalidDateFormat(String),

    #[error("Invalid amount format: '{0}'")]
    InvalidAmountFormat(String),

    /// The report backend could not produce a document
    #[error("Report generation failed: {0}")]
    ReportGenerationFailed(String),

    /// The export artifact could not be written
    #[error("File creation failed: {0}")]
    FileCreationFailed(String),

    /// Export settings are inconsistent
    #[error("Invalid export settings: {0}")]
    InvalidSettings(String),
}

impl LedgerError {
    /// Whether an import can record this error against a single row and move on.
    ///
    /// Storage and I/O failures are not row errors: continuing would produce a
    /// misleading partial result.
    pub fn is_row_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::MissingRequiredField(_)
                | Self::InvalidDateFormat(_)
                | Self::InvalidAmountFormat(_)
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for ledger-bridge operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_parse_error_display() {
        let err = LedgerError::InvalidDateFormat("31/31/2024".into());
        assert_eq!(err.to_string(), "Invalid date format: '31/31/2024'");

        let err = LedgerError::MissingRequiredField("amount".into());
        assert_eq!(err.to_string(), "Missing required field: amount");
    }

    #[test]
    fn test_row_recoverable_classification() {
        assert!(LedgerError::InvalidAmountFormat("abc".into()).is_row_recoverable());
        assert!(LedgerError::MissingRequiredField("date".into()).is_row_recoverable());
        assert!(!LedgerError::Storage("lock poisoned".into()).is_row_recoverable());
        assert!(!LedgerError::EmptyFile.is_row_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}
