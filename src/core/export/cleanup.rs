//! Incremental backup cleanup
//!
//! Saving a model can leave numbered backups next to it
//! (`Kitchen.0001.rvt`, `Kitchen.123.rvt`). They are deleted best-effort after
//! an artifact is written; failures are logged and otherwise ignored. A name
//! like `Unit.101` is a legitimate artifact too, so callers list the files
//! that must survive.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Pattern matching a dot-delimited 3-4 digit suffix before `extension`
pub fn backup_pattern(extension: &str) -> Option<Regex> {
    let extension = extension.trim_start_matches('.');
    Regex::new(&format!(r"(?i)\.\d{{3,4}}\.{}$", regex::escape(extension))).ok()
}

/// Whether `file_name` looks like an incremental backup
pub fn is_backup_file(file_name: &str, extension: &str) -> bool {
    backup_pattern(extension).is_some_and(|re| re.is_match(file_name))
}

/// Delete backup files directly inside `dir`, returning how many were removed
///
/// Files whose name matches the file name of any path in `keep` are never
/// deleted, even when they look like backups.
pub fn delete_backup_files(dir: &Path, extension: &str, keep: &[PathBuf]) -> usize {
    let Some(pattern) = backup_pattern(extension) else {
        return 0;
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "Skipping backup cleanup");
            return 0;
        }
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !pattern.is_match(name) {
            continue;
        }
        if keep.iter().any(|k| k.file_name() == path.file_name()) {
            tracing::debug!(file = %path.display(), "Keeping artifact that looks like a backup");
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                removed += 1;
                tracing::debug!(file = %path.display(), "Deleted backup file");
            }
            Err(e) => {
                tracing::debug!(file = %path.display(), error = %e, "Could not delete backup file");
            }
        }
    }

    if removed > 0 {
        tracing::info!(dir = %dir.display(), removed, "Cleaned up backup files");
    }
    removed
}
