//! CLI command handlers
//!
//! Bridges clap argument parsing with the import and export services.

pub mod export;
pub mod import;

pub use export::{handle_export_command, ExportArgs};
pub use import::handle_import_command;
