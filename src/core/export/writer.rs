//! Export artifact writer
//!
//! Artifacts are produced into a temporary file next to the target and renamed
//! into place, so a failed write never leaves a half-written artifact behind.
//! An existing target is never replaced unless overwriting was requested.
//! Backup cleanup is a separate call so the caller decides which artifacts
//! must survive it.

use super::cleanup::delete_backup_files;
use crate::adapters::host::{HostDocument, SaveAsOptions};
use crate::domain::{Result, SetportError};
use std::fs;
use std::path::{Path, PathBuf};

/// Artifact produced by the writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Writes one artifact per selection set
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    extension: String,
    cleanup_backups: bool,
}

impl ArtifactWriter {
    pub fn new(extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
            cleanup_backups: true,
        }
    }

    pub fn with_cleanup(mut self, cleanup_backups: bool) -> Self {
        self.cleanup_backups = cleanup_backups;
        self
    }

    /// Duplicate `source` to `output`
    ///
    /// # Errors
    ///
    /// - [`SetportError::Conflict`] if `output` exists and `overwrite` is false;
    ///   the existing file is left untouched
    /// - [`SetportError::Io`] if the copy fails
    pub fn write(&self, source: &Path, output: &Path, overwrite: bool) -> Result<WrittenArtifact> {
        check_target(output, overwrite)?;
        if !source.is_file() {
            return Err(SetportError::NotFound(format!(
                "Source document {}",
                source.display()
            )));
        }
        if output.exists() && same_file(source, output) {
            return Err(SetportError::Validation(format!(
                "Artifact path {} is the source document",
                output.display()
            )));
        }

        let temp = prepare_temp(output)?;
        if let Err(e) = fs::copy(source, &temp) {
            discard(&temp);
            return Err(SetportError::Io(format!(
                "Failed to copy {} to {}: {e}",
                source.display(),
                output.display()
            )));
        }

        self.commit(&temp, output)
    }

    /// Save a copy of the open `doc` to `output` through the host
    ///
    /// Same conflict semantics as [`ArtifactWriter::write`]. The overwrite
    /// flag in `options` is ignored; the temporary file is always new.
    pub fn write_from_document(
        &self,
        doc: &mut dyn HostDocument,
        output: &Path,
        overwrite: bool,
        options: &SaveAsOptions,
    ) -> Result<WrittenArtifact> {
        check_target(output, overwrite)?;

        let temp = prepare_temp(output)?;
        let save_options = SaveAsOptions {
            overwrite: true,
            ..*options
        };
        if let Err(e) = doc.save_as(&temp, &save_options) {
            discard(&temp);
            return Err(e.into());
        }

        self.commit(&temp, output)
    }

    /// Remove backup files next to `artifact`, if enabled
    ///
    /// `artifact` itself and every path in `keep` survive the cleanup.
    pub fn cleanup_after(&self, artifact: &Path, keep: &[PathBuf]) -> usize {
        if !self.cleanup_backups {
            return 0;
        }
        let Some(dir) = artifact.parent() else {
            return 0;
        };
        let mut protected = keep.to_vec();
        protected.push(artifact.to_path_buf());
        delete_backup_files(dir, &self.extension, &protected)
    }

    fn commit(&self, temp: &Path, output: &Path) -> Result<WrittenArtifact> {
        if let Err(e) = fs::rename(temp, output) {
            discard(temp);
            return Err(SetportError::Io(format!(
                "Failed to move artifact into place at {}: {e}",
                output.display()
            )));
        }

        let bytes = fs::metadata(output).map(|m| m.len()).unwrap_or(0);
        tracing::debug!(artifact = %output.display(), bytes, "Wrote artifact");

        Ok(WrittenArtifact {
            path: output.to_path_buf(),
            bytes,
        })
    }
}

fn check_target(output: &Path, overwrite: bool) -> Result<()> {
    if output.exists() && !overwrite {
        return Err(SetportError::Conflict(output.to_path_buf()));
    }
    if output.is_dir() {
        return Err(SetportError::Validation(format!(
            "Artifact path {} is a directory",
            output.display()
        )));
    }
    Ok(())
}

/// Create the target directory and pick a temporary path inside it
fn prepare_temp(output: &Path) -> Result<PathBuf> {
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    Ok(dir.join(format!(".{name}.{}.tmp", uuid::Uuid::new_v4().simple())))
}

fn discard(temp: &Path) {
    if let Err(e) = fs::remove_file(temp) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(
                file = %temp.display(),
                error = %e,
                "Failed to remove temporary artifact"
            );
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
