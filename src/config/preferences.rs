//! User preferences persisted between runs
//!
//! Two small files live in the preferences directory:
//!
//! - `settings.json` - structured [`Preferences`], pretty-printed
//! - `last_output_dir.txt` - the last export output directory, one trimmed path
//!
//! Missing or malformed content never fails startup; it reads as defaults or
//! as "no preference".

use crate::domain::{Result, SetportError};
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILENAME: &str = "settings.json";
const LAST_OUTPUT_DIR_FILENAME: &str = "last_output_dir.txt";
const AUDIT_LOG_FILENAME: &str = "SelectionSetAuditLog.csv";
const APP_DIR_NAME: &str = "Setport";

/// Structured user settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Root folder for exports; blank means the default under Documents
    #[serde(default)]
    pub export_root_path: Option<String>,

    #[serde(default)]
    pub last_used_categories: Vec<String>,

    #[serde(default)]
    pub proximity_feet: Option<f64>,

    /// Free-form key/value settings; keys compare case-insensitively
    #[serde(default)]
    pub custom: BTreeMap<String, String>,
}

impl Preferences {
    /// Look up a custom value, ignoring key case
    pub fn custom_value(&self, key: &str) -> Option<&str> {
        self.custom
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Set a custom value, replacing any entry whose key differs only by case
    pub fn set_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.custom.retain(|k, _| !k.eq_ignore_ascii_case(&key));
        self.custom.insert(key, value.into());
    }
}

/// Explicitly constructed preferences store
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    dir: PathBuf,
    current: Preferences,
}

impl PreferencesStore {
    /// Open the store rooted at `dir`, loading whatever is there
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            dir: dir.into(),
            current: Preferences::default(),
        };
        store.load();
        store
    }

    /// Platform configuration directory for Setport
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_DIR_NAME).map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Open the store at the configured directory, or the platform default
    pub fn from_config_dir(dir: Option<&str>) -> Result<Self> {
        let dir = match dir {
            Some(d) if !d.trim().is_empty() => PathBuf::from(d),
            _ => Self::default_dir().ok_or_else(|| {
                SetportError::Configuration(
                    "Could not determine a preferences directory; set [preferences] dir"
                        .to_string(),
                )
            })?,
        };
        Ok(Self::new(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn current(&self) -> &Preferences {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Preferences {
        &mut self.current
    }

    fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILENAME)
    }

    /// Reload settings from disk, falling back to defaults
    pub fn load(&mut self) {
        let path = self.settings_path();
        self.current = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(prefs) => prefs,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Malformed settings file, using defaults"
                    );
                    Preferences::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Unreadable settings file, using defaults"
                );
                Preferences::default()
            }
        };
    }

    /// Persist the current settings
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&self.current)?;
        fs::write(self.settings_path(), json)?;
        tracing::debug!(dir = %self.dir.display(), "Saved preferences");
        Ok(())
    }

    /// Export root folder, defaulting to `<Documents>/Setport/Exports`
    pub fn export_root_path(&self) -> PathBuf {
        if let Some(path) = self
            .current
            .export_root_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
        {
            return PathBuf::from(path.trim());
        }

        UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| self.dir.clone())
            .join(APP_DIR_NAME)
            .join("Exports")
    }

    /// Change the export root and save; blank input is ignored
    pub fn set_export_root_path(&mut self, path: &str) -> Result<()> {
        if path.trim().is_empty() {
            return Ok(());
        }
        self.current.export_root_path = Some(path.trim().to_string());
        self.save()
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.dir.join("logs")
    }

    /// Default location of the CSV audit log
    pub fn audit_log_path(&self) -> PathBuf {
        self.logs_dir().join(AUDIT_LOG_FILENAME)
    }

    /// Remembered output directory, if it still exists
    pub fn last_output_dir(&self) -> Option<PathBuf> {
        let path = self.dir.join(LAST_OUTPUT_DIR_FILENAME);
        let contents = fs::read_to_string(&path).ok()?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return None;
        }

        let dir = PathBuf::from(trimmed);
        if dir.is_dir() {
            Some(dir)
        } else {
            tracing::debug!(dir = %dir.display(), "Remembered output directory no longer exists");
            None
        }
    }

    /// Remember `dir` as the last output directory
    pub fn remember_output_dir(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(
            self.dir.join(LAST_OUTPUT_DIR_FILENAME),
            dir.to_string_lossy().trim(),
        )?;
        Ok(())
    }
}
