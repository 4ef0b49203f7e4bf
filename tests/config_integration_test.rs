//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold `ENV_MUTEX` so they do
//! not interfere with each other.

use setport::config::{
    load_config, load_config_or_default, ArtifactMode, PreferencesStore, UnresolvedMemberPolicy,
};
use setport::core::batch::resolve_steps;
use setport::core::export::ExportSettings;
use std::io::Write;
use std::sync::Mutex;
use tempfile::{NamedTempFile, TempDir};

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("SETPORT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("SETPORT_EXPORT_OUTPUT_DIR");
    std::env::remove_var("SETPORT_EXPORT_SET_NAMES");
    std::env::remove_var("SETPORT_EXPORT_ARTIFACT_MODE");
    std::env::remove_var("SETPORT_BATCH_STEPS");
    std::env::remove_var("TEST_SETPORT_EXPORT_ROOT");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[export]
output_dir = "/exports/tower"
set_names = ["Kitchen", "Bath"]
save_before_export = false
overwrite = true
recenter_xy = false
detach = true
artifact_mode = "save_as"
compact = false
preview = true
unresolved_members = "report"
anchor_category = "floors"
model_extension = "rfa"
cleanup_backups = false
dry_run = true

[batch]
input_dir = "/models"
extension = "rvt"
steps = ["audit_selection_sets", "cleanup_backups"]
save_compact = false
detach = true

[audit]
enabled = true
path = "/var/log/setport/audit.csv"

[preferences]
dir = "/home/user/.config/setport"

[logging]
local_enabled = true
local_path = "/var/log/setport"
local_rotation = "hourly"
local_max_size_mb = 50
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.export.set_names, vec!["Kitchen", "Bath"]);
    assert!(!config.export.save_before_export);
    assert!(config.export.overwrite);
    assert!(!config.export.recenter_xy);
    assert!(config.export.detach);
    assert_eq!(config.export.artifact_mode, ArtifactMode::SaveAs);
    assert_eq!(config.export.unresolved_members, UnresolvedMemberPolicy::Report);
    assert_eq!(config.export.anchor_category, "floors");
    assert!(config.export.dry_run);
    assert_eq!(config.batch.steps.len(), 2);
    assert_eq!(config.audit.path.as_deref(), Some("/var/log/setport/audit.csv"));
    assert_eq!(config.preferences.dir.as_deref(), Some("/home/user/.config/setport"));
    assert_eq!(config.logging.local_rotation, "hourly");

    let settings = ExportSettings::from_config(&config.export).unwrap();
    assert_eq!(settings.output_dir, std::path::PathBuf::from("/exports/tower"));
    assert_eq!(settings.anchor_category.to_string(), "floors");
    assert!(resolve_steps(&config.batch.steps).is_ok());
}

#[test]
fn test_empty_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config("");
    let config = load_config(temp_file.path()).unwrap();

    assert!(config.export.set_names.is_empty());
    assert!(config.export.save_before_export);
    assert!(config.export.recenter_xy);
    assert_eq!(config.export.artifact_mode, ArtifactMode::Copy);
    assert_eq!(config.export.unresolved_members, UnresolvedMemberPolicy::Ignore);
    assert_eq!(config.batch.steps, vec!["open_and_save"]);
    assert!(config.audit.enabled);

    // An empty output directory must be chosen before exporting
    assert!(ExportSettings::from_config(&config.export).is_err());
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_SETPORT_EXPORT_ROOT", "/mnt/exports");

    let temp_file = write_config(
        r#"
[export]
output_dir = "${TEST_SETPORT_EXPORT_ROOT}/tower"
"#,
    );
    let config = load_config(temp_file.path()).unwrap();
    assert_eq!(config.export.output_dir, "/mnt/exports/tower");

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[export]
output_dir = "${TEST_SETPORT_EXPORT_ROOT}"
"#,
    );
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_SETPORT_EXPORT_ROOT"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("SETPORT_EXPORT_SET_NAMES", "Attic, Basement");
    std::env::set_var("SETPORT_EXPORT_ARTIFACT_MODE", "save_as");
    std::env::set_var("SETPORT_BATCH_STEPS", "cleanup_backups");

    let temp_file = write_config(
        r#"
[export]
set_names = ["Kitchen"]
"#,
    );
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.export.set_names, vec!["Attic", "Basement"]);
    assert_eq!(config.export.artifact_mode, ArtifactMode::SaveAs);
    assert_eq!(config.batch.steps, vec!["cleanup_backups"]);

    cleanup_env_vars();
}

#[test]
fn test_invalid_env_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("SETPORT_EXPORT_ARTIFACT_MODE", "link");

    let result = load_config_or_default("nonexistent-setport.toml");
    assert!(result.is_err());

    cleanup_env_vars();
}

#[test]
fn test_validation_errors() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for contents in [
        "[application]\nlog_level = \"loud\"\n",
        "[export]\nanchor_category = \"\"\n",
        "[export]\nset_names = [\"Kitchen\", \" \"]\n",
        "[export]\nmodel_extension = \"r.vt\"\n",
        "[batch]\nsteps = []\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ] {
        let temp_file = write_config(contents);
        assert!(
            load_config(temp_file.path()).is_err(),
            "accepted invalid config: {contents}"
        );
    }
}

#[test]
fn test_unknown_artifact_mode_fails_to_parse() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config("[export]\nartifact_mode = \"link\"\n");
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}

#[test]
fn test_preferences_remember_output_dir() {
    let dir = TempDir::new().unwrap();
    let prefs_dir = dir.path().join("prefs");
    let out = dir.path().join("exports");
    std::fs::create_dir_all(&out).unwrap();

    let store = PreferencesStore::from_config_dir(prefs_dir.to_str()).unwrap();
    assert!(store.last_output_dir().is_none());
    store.remember_output_dir(&out).unwrap();

    let reopened = PreferencesStore::from_config_dir(prefs_dir.to_str()).unwrap();
    assert_eq!(reopened.last_output_dir(), Some(out));
    assert!(reopened
        .audit_log_path()
        .ends_with("SelectionSetAuditLog.csv"));
}
