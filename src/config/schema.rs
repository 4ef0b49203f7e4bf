//! Configuration schema types
//!
//! This module defines the configuration structure for Setport. Every section
//! has defaults, so an empty file (or no file at all) is a usable
//! configuration.

use serde::{Deserialize, Serialize};

/// How an export artifact is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactMode {
    /// Duplicate the source file on disk
    #[default]
    Copy,
    /// Save a copy of the open source document through the host
    SaveAs,
}

/// What to do about selection set members that do not survive the export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedMemberPolicy {
    /// Drop them silently
    #[default]
    Ignore,
    /// Drop them and add a warning to the set's report
    Report,
}

/// Main Setport configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SetportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Selection set export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Batch process pipeline settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// CSV audit log settings
    #[serde(default)]
    pub audit: AuditConfig,

    /// Preferences store location
    #[serde(default)]
    pub preferences: PreferencesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SetportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.batch.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Selection set export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving one artifact per set
    ///
    /// May be left empty here and supplied on the command line or taken from
    /// the remembered output directory.
    #[serde(default)]
    pub output_dir: String,

    /// Sets to export, in order; empty means every set in the document
    #[serde(default)]
    pub set_names: Vec<String>,

    /// Save the source document first when it has unsaved changes
    #[serde(default = "default_true")]
    pub save_before_export: bool,

    /// Replace artifacts that already exist
    #[serde(default)]
    pub overwrite: bool,

    /// Center each artifact's set at the origin in the horizontal plane
    #[serde(default = "default_true")]
    pub recenter_xy: bool,

    /// Detach each artifact from its central model
    #[serde(default)]
    pub detach: bool,

    #[serde(default)]
    pub artifact_mode: ArtifactMode,

    /// Compact artifacts when the host saves them
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Embed a preview image in `save_as` artifacts
    #[serde(default)]
    pub preview: bool,

    #[serde(default)]
    pub unresolved_members: UnresolvedMemberPolicy,

    /// Category whose footprint drives recentering
    #[serde(default = "default_anchor_category")]
    pub anchor_category: String,

    /// Artifact file extension (without the dot)
    #[serde(default = "default_model_extension")]
    pub model_extension: String,

    /// Delete incremental backup files left next to artifacts
    #[serde(default = "default_true")]
    pub cleanup_backups: bool,

    /// Read and capture everything but write no artifacts
    #[serde(default)]
    pub dry_run: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.anchor_category.trim().is_empty() {
            return Err("export.anchor_category cannot be empty".to_string());
        }

        validate_extension("export.model_extension", &self.model_extension)?;

        for name in &self.set_names {
            if name.trim().is_empty() {
                return Err("export.set_names cannot contain empty names".to_string());
            }
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: String::new(),
            set_names: Vec::new(),
            save_before_export: true,
            overwrite: false,
            recenter_xy: true,
            detach: false,
            artifact_mode: ArtifactMode::default(),
            compact: true,
            preview: false,
            unresolved_members: UnresolvedMemberPolicy::default(),
            anchor_category: default_anchor_category(),
            model_extension: default_model_extension(),
            cleanup_backups: true,
            dry_run: false,
        }
    }
}

/// Batch process pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Folder whose top-level documents are processed
    #[serde(default)]
    pub input_dir: String,

    /// Extension of documents to pick up (without the dot)
    #[serde(default = "default_model_extension")]
    pub extension: String,

    /// Ids of the steps to run, in order
    #[serde(default = "default_batch_steps")]
    pub steps: Vec<String>,

    /// Compact documents when saving them
    #[serde(default = "default_true")]
    pub save_compact: bool,

    /// Open documents detached from their central model
    #[serde(default)]
    pub detach: bool,
}

impl BatchConfig {
    fn validate(&self) -> Result<(), String> {
        validate_extension("batch.extension", &self.extension)?;

        if self.steps.is_empty() {
            return Err("batch.steps must name at least one step".to_string());
        }

        Ok(())
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: String::new(),
            extension: default_model_extension(),
            steps: default_batch_steps(),
            save_compact: true,
            detach: false,
        }
    }
}

/// CSV audit log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Audit file path; defaults to a file under the preferences directory
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.path {
            if path.trim().is_empty() {
                return Err("audit.path cannot be empty when set".to_string());
            }
        }
        Ok(())
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

/// Preferences store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PreferencesConfig {
    /// Directory holding settings.json and last_output_dir.txt
    #[serde(default)]
    pub dir: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Maximum log file size in MB
    #[serde(default = "default_local_max_size_mb")]
    pub local_max_size_mb: usize,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_max_size_mb == 0 {
            return Err("logging.local_max_size_mb must be > 0".to_string());
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            local_max_size_mb: default_local_max_size_mb(),
        }
    }
}

fn validate_extension(field: &str, extension: &str) -> Result<(), String> {
    let trimmed = extension.trim_start_matches('.');
    if trimmed.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!(
            "{field} '{extension}' must contain only letters and digits"
        ));
    }
    Ok(())
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_anchor_category() -> String {
    "walls".to_string()
}

fn default_model_extension() -> String {
    "rvt".to_string()
}

fn default_batch_steps() -> Vec<String> {
    vec!["open_and_save".to_string()]
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_local_max_size_mb() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig {
            log_level: "info".to_string(),
        };

        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SetportConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.export.recenter_xy);
        assert!(!config.export.overwrite);
        assert_eq!(config.export.artifact_mode, ArtifactMode::Copy);
        assert_eq!(
            config.export.unresolved_members,
            UnresolvedMemberPolicy::Ignore
        );
        assert_eq!(config.batch.steps, vec!["open_and_save"]);
    }

    #[test]
    fn test_export_config_validation() {
        let mut config = ExportConfig::default();
        assert!(config.validate().is_ok());

        config.anchor_category = "  ".to_string();
        assert!(config.validate().is_err());

        config.anchor_category = "walls".to_string();
        config.model_extension = "r/t".to_string();
        assert!(config.validate().is_err());

        config.model_extension = ".rvt".to_string();
        assert!(config.validate().is_ok());

        config.set_names = vec!["Kitchen".to_string(), "".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_batch_config_requires_steps() {
        let mut config = BatchConfig::default();
        assert!(config.validate().is_ok());

        config.steps.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_max_size_mb = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enum_serialization() {
        let mode: ArtifactMode = serde_json::from_str("\"save_as\"").unwrap();
        assert_eq!(mode, ArtifactMode::SaveAs);

        let policy: UnresolvedMemberPolicy = serde_json::from_str("\"report\"").unwrap();
        assert_eq!(policy, UnresolvedMemberPolicy::Report);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SetportConfig = toml::from_str(
            r#"
            [export]
            output_dir = "/out"
            set_names = ["Kitchen", "Bath"]
            "#,
        )
        .unwrap();

        assert_eq!(config.export.output_dir, "/out");
        assert_eq!(config.export.set_names.len(), 2);
        assert!(config.export.save_before_export);
        assert_eq!(config.application.log_level, "info");
    }
}
