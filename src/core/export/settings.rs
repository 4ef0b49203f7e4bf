//! Export settings and per-set jobs

use crate::config::schema::{ArtifactMode, ExportConfig, UnresolvedMemberPolicy};
use crate::domain::filename::sanitize_file_name;
use crate::domain::ids::{Category, IdentityToken};
use crate::domain::{Result, SetportError};
use std::path::{Path, PathBuf};

/// Immutable settings for one export run
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    /// Sets to export, in order; empty means every set
    pub set_names: Vec<String>,
    pub output_dir: PathBuf,
    pub save_before_export: bool,
    pub overwrite: bool,
    pub recenter_xy: bool,
    pub detach: bool,
    pub artifact_mode: ArtifactMode,
    pub compact: bool,
    pub preview: bool,
    pub unresolved_members: UnresolvedMemberPolicy,
    pub anchor_category: Category,
    /// Artifact extension without the dot
    pub model_extension: String,
    pub cleanup_backups: bool,
    pub dry_run: bool,
}

impl ExportSettings {
    /// Settings with defaults for everything except the output directory
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let defaults = ExportConfig::default();
        Self {
            set_names: Vec::new(),
            output_dir: output_dir.into(),
            save_before_export: defaults.save_before_export,
            overwrite: defaults.overwrite,
            recenter_xy: defaults.recenter_xy,
            detach: defaults.detach,
            artifact_mode: defaults.artifact_mode,
            compact: defaults.compact,
            preview: defaults.preview,
            unresolved_members: defaults.unresolved_members,
            anchor_category: Category::new(&defaults.anchor_category),
            model_extension: defaults.model_extension,
            cleanup_backups: defaults.cleanup_backups,
            dry_run: defaults.dry_run,
        }
    }

    /// Build settings from the `[export]` section
    ///
    /// # Errors
    ///
    /// Returns [`SetportError::Configuration`] when no output directory is set.
    pub fn from_config(config: &ExportConfig) -> Result<Self> {
        if config.output_dir.trim().is_empty() {
            return Err(SetportError::Configuration(
                "export.output_dir is empty; choose an output directory".to_string(),
            ));
        }

        Ok(Self {
            set_names: config.set_names.clone(),
            output_dir: PathBuf::from(config.output_dir.trim()),
            save_before_export: config.save_before_export,
            overwrite: config.overwrite,
            recenter_xy: config.recenter_xy,
            detach: config.detach,
            artifact_mode: config.artifact_mode,
            compact: config.compact,
            preview: config.preview,
            unresolved_members: config.unresolved_members,
            anchor_category: Category::new(&config.anchor_category),
            model_extension: config.model_extension.trim_start_matches('.').to_string(),
            cleanup_backups: config.cleanup_backups,
            dry_run: config.dry_run,
        })
    }

    pub fn with_set_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_recenter(mut self, recenter_xy: bool) -> Self {
        self.recenter_xy = recenter_xy;
        self
    }

    pub fn with_detach(mut self, detach: bool) -> Self {
        self.detach = detach;
        self
    }

    pub fn with_artifact_mode(mut self, mode: ArtifactMode) -> Self {
        self.artifact_mode = mode;
        self
    }

    pub fn with_unresolved_members(mut self, policy: UnresolvedMemberPolicy) -> Self {
        self.unresolved_members = policy;
        self
    }

    pub fn with_save_before_export(mut self, save: bool) -> Self {
        self.save_before_export = save;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_anchor_category(mut self, category: Category) -> Self {
        self.anchor_category = category;
        self
    }

    /// Reject settings that cannot run before any set is processed
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(SetportError::Configuration(
                "Output directory is empty; choose an output directory".to_string(),
            ));
        }
        if self.model_extension.is_empty() {
            return Err(SetportError::Configuration(
                "Model extension cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Output path for a set: sanitized name plus the model extension
    pub fn output_path_for(&self, set_name: &str) -> PathBuf {
        artifact_path(&self.output_dir, set_name, &self.model_extension)
    }
}

/// `<dir>/<sanitized name>.<extension>`
pub fn artifact_path(dir: &Path, set_name: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}.{}", sanitize_file_name(set_name), extension))
}

/// Work planned for one selection set
///
/// Created when the catalog is read, before any artifact is written. Holds
/// durable tokens only, never element references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub set_name: String,
    /// Captured tokens in member order
    pub tokens: Vec<IdentityToken>,
    /// Member count in the source set
    pub source_member_count: usize,
    /// Members without a durable identity
    pub missing_identity: usize,
    pub output_path: PathBuf,
}

impl ExportJob {
    /// Whether at least one member can be found again in the artifact
    pub fn has_resolvable_members(&self) -> bool {
        !self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_rejects_empty_output_dir() {
        let config = ExportConfig::default();
        let err = ExportSettings::from_config(&config).unwrap_err();
        assert!(matches!(err, SetportError::Configuration(_)));
    }

    #[test]
    fn test_from_config() {
        let config = ExportConfig {
            output_dir: " /out ".to_string(),
            set_names: vec!["Kitchen".to_string()],
            model_extension: ".rvt".to_string(),
            anchor_category: "Walls".to_string(),
            ..ExportConfig::default()
        };
        let settings = ExportSettings::from_config(&config).unwrap();

        assert_eq!(settings.output_dir, PathBuf::from("/out"));
        assert_eq!(settings.model_extension, "rvt");
        assert_eq!(settings.anchor_category, Category::walls());
        assert_eq!(
            settings.output_path_for("Kitchen"),
            PathBuf::from("/out/Kitchen.rvt")
        );
    }

    #[test]
    fn test_output_path_is_sanitized() {
        let settings = ExportSettings::new("/out");
        assert_eq!(
            settings.output_path_for("Level 1: A/B"),
            PathBuf::from("/out/Level 1_ A_B.rvt")
        );
    }

    #[test]
    fn test_validate() {
        assert!(ExportSettings::new("/out").validate().is_ok());
        assert!(ExportSettings::new("").validate().is_err());
    }
}
