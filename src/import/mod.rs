//! CSV import pipeline
//!
//! Text flows through the [`tokenizer`], the header through the column
//! [`mapping`], and each data row through the field [`parsers`], the entity
//! [`resolver`] and the [`duplicates`] check before [`ImportService`]
//! commits it.
//!
//! ```rust,ignore
//! let service = ImportService::new(&storage, &settings);
//! let result = service.import_file(Path::new("bank.csv"))?;
//! for error in &result.errors {
//!     eprintln!("{}", error);
//! }
//! ```

pub mod duplicates;
pub mod mapping;
pub mod parsers;
pub mod resolver;
pub mod service;
pub mod tokenizer;

pub use mapping::{ColumnMapping, Field};
pub use resolver::EntityResolver;
pub use service::{ImportResult, ImportRowError, ImportService};
