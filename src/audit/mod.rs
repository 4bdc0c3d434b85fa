//! Append-only audit log
//!
//! Every entity the import pipeline creates, and every balance it changes, is
//! recorded as one JSON line in `audit.log`. Entries for one import are
//! written together after the repositories have been saved.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
