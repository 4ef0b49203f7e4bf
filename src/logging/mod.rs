//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local file logging with rotation
//! - Helper macros for the export and batch workflows
//!
//! # Example
//!
//! ```no_run
//! use setport::logging::init_logging;
//! use setport::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of one selection set export
///
/// # Example
///
/// ```no_run
/// use setport::log_set_export_start;
///
/// log_set_export_start!("Kitchen", 12);
/// ```
#[macro_export]
macro_rules! log_set_export_start {
    ($set_name:expr, $members:expr) => {
        tracing::info!(
            set_name = %$set_name,
            members = $members,
            "Exporting selection set"
        );
    };
}

/// Log the outcome of one selection set export
///
/// # Example
///
/// ```no_run
/// use setport::log_set_export_complete;
/// use std::time::Duration;
///
/// log_set_export_complete!("Kitchen", "exported", Duration::from_millis(250));
/// ```
#[macro_export]
macro_rules! log_set_export_complete {
    ($set_name:expr, $status:expr, $duration:expr) => {
        tracing::info!(
            set_name = %$set_name,
            status = %$status,
            duration_ms = $duration.as_millis() as u64,
            "Selection set finished"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use setport::log_error_with_context;
/// use setport::domain::SetportError;
///
/// let error = SetportError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log batch progress with a 1-based index
///
/// # Example
///
/// ```no_run
/// use setport::log_batch_progress;
///
/// log_batch_progress!(3, 10, "tower.rvt");
/// ```
#[macro_export]
macro_rules! log_batch_progress {
    ($index:expr, $total:expr, $file:expr) => {
        tracing::info!(
            index = $index,
            total = $total,
            file = %$file,
            progress_pct = ($index as f64 / ($total as f64).max(1.0) * 100.0),
            "Processing file"
        );
    };
}
