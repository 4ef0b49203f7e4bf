//! Guaranteed release of opened documents

use super::traits::{HostApplication, HostDocument, HostResult, OpenOptions};
use std::path::{Path, PathBuf};

/// An opened document that is closed when the handle goes out of scope
///
/// Every "open, work, close" sequence goes through a `DocumentHandle`, so an
/// error or early return during the work never leaks an open document.
/// Dropping the handle discards unsaved changes; call [`DocumentHandle::close`]
/// to observe close failures.
pub struct DocumentHandle {
    document: Box<dyn HostDocument>,
    path: PathBuf,
    closed: bool,
}

impl DocumentHandle {
    /// Open `path` through the host
    pub fn open(
        host: &dyn HostApplication,
        path: &Path,
        options: &OpenOptions,
    ) -> HostResult<Self> {
        let document = host.open_document(path, options)?;
        tracing::debug!(path = %path.display(), "Opened document");
        Ok(Self {
            document,
            path: path.to_path_buf(),
            closed: false,
        })
    }

    /// Path the document was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &dyn HostDocument {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> &mut dyn HostDocument {
        self.document.as_mut()
    }

    /// Close the document explicitly, reporting any failure
    pub fn close(mut self) -> HostResult<()> {
        self.closed = true;
        let result = self.document.close();
        tracing::debug!(path = %self.path.display(), "Closed document");
        result
    }
}

impl Drop for DocumentHandle {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.document.close() {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to close document during cleanup"
            );
        } else {
            tracing::debug!(path = %self.path.display(), "Closed document during cleanup");
        }
    }
}
