//! ledger-bridge - CSV import and multi-format export for personal finance data
//!
//! Loosely structured bank CSV files are normalized into transactions,
//! accounts and categories, and the stored records can be exported again as
//! CSV, JSON or a paginated text report.
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: Error type shared by every layer
//! - `models`: Accounts, transactions, categories, budgets, subscriptions, goals
//! - `storage`: JSON file repositories with atomic writes
//! - `audit`: Append-only audit log of entity changes
//! - `import`: CSV tokenizing, column mapping, parsing and row commit
//! - `export`: CSV, JSON and report serialization
//! - `cli`: Command handlers for the `ledger` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use ledger_bridge::config::{LedgerPaths, Settings};
//! use ledger_bridge::import::ImportService;
//! use ledger_bridge::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! let result = ImportService::new(&storage, &settings).import_file("bank.csv".as_ref())?;
//! ```

use std::sync::Once;

pub mod audit;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod storage;

pub use error::{LedgerError, LedgerResult};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber, logging to stderr
///
/// `RUST_LOG` overrides the default `ledger_bridge=info` filter. Calling this
/// more than once is harmless.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ledger_bridge=info"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
