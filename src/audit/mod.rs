//! Audit logging for FinVault
//!
//! Records create, update, delete and import operations with before/after
//! snapshots in an append-only JSON-lines file next to the data directory.
//!
//! - `AuditEntry`: one operation on one entity, with redacted snapshots.
//! - `AuditLogger`: appends entries and reads them back.
//! - `generate_diff`: top-level field changes between two snapshots.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{redact_secrets, AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
