//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{ArtifactMode, SetportConfig, UnresolvedMemberPolicy};
use crate::domain::errors::SetportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SetportConfig
/// 4. Applies environment variable overrides (SETPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`SetportError::Configuration`] if the file cannot be read or
/// parsed, a referenced variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use setport::config::loader::load_config;
///
/// let config = load_config("setport.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SetportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SetportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SetportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration from `path`, or defaults when the file does not exist
///
/// Environment overrides and validation still apply to the defaults.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<SetportConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    let mut config = SetportConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration from TOML text
pub fn parse_config(contents: &str) -> Result<SetportConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: SetportConfig = toml::from_str(&contents)
        .map_err(|e| SetportError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &SetportConfig) -> Result<()> {
    config.validate().map_err(|e| {
        SetportError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| SetportError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(SetportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Applies environment variable overrides using SETPORT_* prefix
///
/// Environment variables follow the pattern: SETPORT_<SECTION>_<KEY>
/// For example: SETPORT_EXPORT_OUTPUT_DIR, SETPORT_BATCH_STEPS
fn apply_env_overrides(config: &mut SetportConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("SETPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("SETPORT_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("SETPORT_EXPORT_SET_NAMES") {
        config.export.set_names = split_list(&val);
    }
    if let Some(val) = env_bool("SETPORT_EXPORT_SAVE_BEFORE_EXPORT") {
        config.export.save_before_export = val;
    }
    if let Some(val) = env_bool("SETPORT_EXPORT_OVERWRITE") {
        config.export.overwrite = val;
    }
    if let Some(val) = env_bool("SETPORT_EXPORT_RECENTER_XY") {
        config.export.recenter_xy = val;
    }
    if let Some(val) = env_bool("SETPORT_EXPORT_DETACH") {
        config.export.detach = val;
    }
    if let Ok(val) = std::env::var("SETPORT_EXPORT_ARTIFACT_MODE") {
        config.export.artifact_mode = match val.to_lowercase().as_str() {
            "copy" => ArtifactMode::Copy,
            "save_as" => ArtifactMode::SaveAs,
            other => {
                return Err(SetportError::Configuration(format!(
                    "Invalid SETPORT_EXPORT_ARTIFACT_MODE '{other}'. Must be one of: copy, save_as"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("SETPORT_EXPORT_UNRESOLVED_MEMBERS") {
        config.export.unresolved_members = match val.to_lowercase().as_str() {
            "ignore" => UnresolvedMemberPolicy::Ignore,
            "report" => UnresolvedMemberPolicy::Report,
            other => {
                return Err(SetportError::Configuration(format!(
                    "Invalid SETPORT_EXPORT_UNRESOLVED_MEMBERS '{other}'. \
                     Must be one of: ignore, report"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("SETPORT_EXPORT_ANCHOR_CATEGORY") {
        config.export.anchor_category = val;
    }
    if let Some(val) = env_bool("SETPORT_EXPORT_DRY_RUN") {
        config.export.dry_run = val;
    }

    // Batch overrides
    if let Ok(val) = std::env::var("SETPORT_BATCH_INPUT_DIR") {
        config.batch.input_dir = val;
    }
    if let Ok(val) = std::env::var("SETPORT_BATCH_EXTENSION") {
        config.batch.extension = val;
    }
    if let Ok(val) = std::env::var("SETPORT_BATCH_STEPS") {
        config.batch.steps = split_list(&val);
    }
    if let Some(val) = env_bool("SETPORT_BATCH_DETACH") {
        config.batch.detach = val;
    }

    // Audit overrides
    if let Some(val) = env_bool("SETPORT_AUDIT_ENABLED") {
        config.audit.enabled = val;
    }
    if let Ok(val) = std::env::var("SETPORT_AUDIT_PATH") {
        config.audit.path = Some(val);
    }

    // Preferences overrides
    if let Ok(val) = std::env::var("SETPORT_PREFERENCES_DIR") {
        config.preferences.dir = Some(val);
    }

    // Logging overrides
    if let Some(val) = env_bool("SETPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val;
    }
    if let Ok(val) = std::env::var("SETPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("SETPORT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

/// Splits a comma-separated override into trimmed, non-empty items
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("SETPORT_TEST_OUT", "/exports");
        let input = "output_dir = \"${SETPORT_TEST_OUT}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "output_dir = \"/exports\"");
        std::env::remove_var("SETPORT_TEST_OUT");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("SETPORT_TEST_MISSING");
        let input = "output_dir = \"${SETPORT_TEST_MISSING}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("SETPORT_TEST_COMMENTED");
        let input = "# output_dir = \"${SETPORT_TEST_COMMENTED}\"\nx = 1";
        assert_eq!(substitute_env_vars(input).unwrap(), input);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(" Kitchen, Bath ,,Attic"),
            vec!["Kitchen", "Bath", "Attic"]
        );
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-setport.toml");
        assert!(matches!(result, Err(SetportError::Configuration(_))));
    }

    #[test]
    fn test_load_config_or_default_missing_file() {
        let config = load_config_or_default("nonexistent-setport.toml").unwrap();
        assert_eq!(config.export.anchor_category, "walls");
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[export]
output_dir = "/out"
set_names = ["Kitchen", "Bath"]
overwrite = true
artifact_mode = "save_as"
unresolved_members = "report"

[batch]
steps = ["audit_selection_sets", "open_and_save"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.export.output_dir, "/out");
        assert!(config.export.overwrite);
        assert_eq!(config.export.artifact_mode, ArtifactMode::SaveAs);
        assert_eq!(
            config.export.unresolved_members,
            UnresolvedMemberPolicy::Report
        );
        assert_eq!(config.batch.steps.len(), 2);
    }

    #[test]
    fn test_parse_config_rejects_invalid_values() {
        let result = parse_config("[application]\nlog_level = \"loud\"\n");
        assert!(matches!(result, Err(SetportError::Configuration(_))));

        let result = parse_config("[export]\nartifact_mode = \"teleport\"\n");
        assert!(result.is_err());
    }
}
