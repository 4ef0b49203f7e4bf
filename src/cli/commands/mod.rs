//! CLI command implementations
//!
//! This module contains all CLI command implementations plus the helpers
//! they share for preferences, auditing and exit codes.

pub mod batch;
pub mod export;
pub mod init;
pub mod list;
pub mod validate;

use crate::audit::AuditLogger;
use crate::config::{PreferencesStore, SetportConfig};
use crate::domain::SetportError;
use std::sync::Arc;

/// Exit code for a run that completed with per-item failures
pub const EXIT_PARTIAL: i32 = 1;
/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;
/// Exit code when cancellation stopped the run (SIGINT convention)
pub const EXIT_INTERRUPTED: i32 = 130;

/// Map an error that ended a command to its exit code
pub fn exit_code_for(error: &SetportError) -> i32 {
    match error {
        SetportError::Configuration(_) | SetportError::Validation(_) => EXIT_CONFIG,
        SetportError::Canceled => EXIT_INTERRUPTED,
        _ => EXIT_FATAL,
    }
}

/// Open the preferences store; problems are logged and yield `None`
pub(crate) fn open_preferences(config: &SetportConfig) -> Option<PreferencesStore> {
    match PreferencesStore::from_config_dir(config.preferences.dir.as_deref()) {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!(error = %e, "Preferences unavailable");
            None
        }
    }
}

/// Audit logger for `[audit]`, defaulting to the preferences logs folder
pub(crate) fn audit_logger(
    config: &SetportConfig,
    preferences: Option<&PreferencesStore>,
) -> Arc<AuditLogger> {
    if !config.audit.enabled {
        return Arc::new(AuditLogger::disabled());
    }

    let path = config
        .audit
        .path
        .as_deref()
        .map(std::path::PathBuf::from)
        .or_else(|| preferences.map(PreferencesStore::audit_log_path));

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Audit log enabled");
            Arc::new(AuditLogger::new(path))
        }
        None => {
            tracing::warn!("No audit log location available, auditing disabled");
            Arc::new(AuditLogger::disabled())
        }
    }
}
