//! CSV audit writer

use crate::domain::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Header written once when the audit file is created
pub const AUDIT_HEADER: &str =
    "TimestampUtc,DocumentTitle,DocumentPath,SetName,Category,ElementCount,Notes";

/// One audit row
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub timestamp_utc: DateTime<Utc>,
    pub document_title: String,
    pub document_path: String,
    pub set_name: String,
    pub category: String,
    pub element_count: usize,
    pub notes: String,
}

impl AuditEntry {
    /// Creates an entry stamped with the current time
    pub fn new(document_title: impl Into<String>, set_name: impl Into<String>) -> Self {
        Self {
            timestamp_utc: Utc::now(),
            document_title: document_title.into(),
            document_path: String::new(),
            set_name: set_name.into(),
            category: String::new(),
            element_count: 0,
            notes: String::new(),
        }
    }

    pub fn with_document_path(mut self, path: Option<&Path>) -> Self {
        self.document_path = path.map(|p| p.display().to_string()).unwrap_or_default();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_element_count(mut self, count: usize) -> Self {
        self.element_count = count;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Render the entry as one CSV line (without the newline)
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.timestamp_utc.to_rfc3339_opts(SecondsFormat::Millis, true),
            escape(&self.document_title),
            escape(&self.document_path),
            escape(&self.set_name),
            escape(&self.category),
            self.element_count,
            escape(&self.notes),
        )
    }
}

/// Quote a field, doubling embedded quotes
fn escape(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Appends audit rows to a CSV file
///
/// Writes are serialized through an internal lock so one logger can be shared
/// between the export coordinator and process steps.
#[derive(Debug)]
pub struct AuditLogger {
    path: PathBuf,
    enabled: bool,
    lock: Mutex<()>,
}

impl AuditLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            enabled: true,
            lock: Mutex::new(()),
        }
    }

    /// A logger that accepts entries and writes nothing
    pub fn disabled() -> Self {
        Self {
            path: PathBuf::new(),
            enabled: false,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append one row, creating the file (and its header) on first write
    pub fn log(&self, entry: &AuditEntry) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        // A poisoned lock only means another writer panicked mid-append
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let write_header = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if write_header {
            writeln!(file, "{AUDIT_HEADER}")?;
        }
        writeln!(file, "{}", entry.to_csv_row())?;
        Ok(())
    }

    /// Append a row, logging instead of returning failures
    pub fn log_or_warn(&self, entry: &AuditEntry) {
        if let Err(e) = self.log(entry) {
            tracing::warn!(
                path = %self.path.display(),
                set_name = %entry.set_name,
                error = %e,
                "Failed to write audit entry"
            );
        }
    }
}
