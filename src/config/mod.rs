//! Configuration management for Setport.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation, plus the user preferences store.
//!
//! # Overview
//!
//! Setport uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SETPORT_<SECTION>_<KEY>` overrides
//! - Default values for every setting
//! - Comprehensive validation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use setport::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("setport.toml")?;
//!
//! println!("Output: {}", config.export.output_dir);
//! println!("Steps: {:?}", config.batch.steps);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ExportConfig`] - Selection set export settings
//! - [`BatchConfig`] - Batch process pipeline settings
//! - [`AuditConfig`] - CSV audit log
//! - [`PreferencesConfig`] - Preferences store location
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! output_dir = "${SETPORT_OUT}"
//! set_names = ["Kitchen", "Bath"]
//! overwrite = false
//! recenter_xy = true
//! unresolved_members = "report"
//!
//! [batch]
//! input_dir = "/projects/models"
//! steps = ["audit_selection_sets", "open_and_save"]
//! ```

pub mod loader;
pub mod preferences;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, parse_config};
pub use preferences::{Preferences, PreferencesStore};
pub use schema::{
    ApplicationConfig, ArtifactMode, AuditConfig, BatchConfig, ExportConfig, LoggingConfig,
    PreferencesConfig, SetportConfig, UnresolvedMemberPolicy,
};
