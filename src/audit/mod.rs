//! Append-only CSV audit log
//!
//! One row per exported or failed selection set, and one row per
//! (set, category) pair from the selection set audit step.

pub mod logger;

pub use logger::{AuditEntry, AuditLogger, AUDIT_HEADER};
