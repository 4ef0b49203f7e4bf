//! File-backed host application

use super::document::ModelDocument;
use crate::adapters::host::traits::{HostApplication, HostDocument, HostResult, OpenOptions};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Default model document extension
pub const DEFAULT_MODEL_EXTENSION: &str = "rvt";

/// Host that opens JSON model documents from disk
///
/// The host counts the documents it has opened and not yet closed, and the
/// highest number that were ever open at once.
#[derive(Debug, Clone)]
pub struct ModelHost {
    extension: String,
    open_documents: Arc<AtomicUsize>,
    peak_open_documents: Arc<AtomicUsize>,
}

impl ModelHost {
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_MODEL_EXTENSION)
    }

    pub fn with_extension(extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
            open_documents: Arc::new(AtomicUsize::new(0)),
            peak_open_documents: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of documents currently open through this host
    pub fn open_documents(&self) -> usize {
        self.open_documents.load(Ordering::SeqCst)
    }

    /// Highest number of documents that were open at the same time
    pub fn peak_open_documents(&self) -> usize {
        self.peak_open_documents.load(Ordering::SeqCst)
    }
}

impl Default for ModelHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostApplication for ModelHost {
    fn open_document(
        &self,
        path: &Path,
        options: &OpenOptions,
    ) -> HostResult<Box<dyn HostDocument>> {
        let document = ModelDocument::open(path, options)?.track_with(self.open_documents.clone());
        self.peak_open_documents
            .fetch_max(self.open_documents(), Ordering::SeqCst);
        tracing::trace!(
            path = %path.display(),
            open = self.open_documents(),
            "Model document opened"
        );
        Ok(Box::new(document))
    }

    fn document_extension(&self) -> &str {
        &self.extension
    }
}
