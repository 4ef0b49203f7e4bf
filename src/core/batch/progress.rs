//! Batch progress events
//!
//! Each file produces exactly two events: `process` before it is opened and
//! `close` after it has been released, both carrying a 1-based index.

use crate::log_batch_progress;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchPhase {
    Process,
    Close,
}

impl fmt::Display for BatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchPhase::Process => write!(f, "process"),
            BatchPhase::Close => write!(f, "close"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    /// 1-based position of the file in the batch
    pub index: usize,
    pub total: usize,
    pub file_path: PathBuf,
    pub phase: BatchPhase,
}

/// Receives progress events between items
pub trait ProgressReporter: Send + Sync {
    fn report(&self, progress: &BatchProgress);
}

/// Forwards events to a channel; a closed receiver is ignored
impl ProgressReporter for mpsc::UnboundedSender<BatchProgress> {
    fn report(&self, progress: &BatchProgress) {
        let _ = self.send(progress.clone());
    }
}

/// Writes progress to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn report(&self, progress: &BatchProgress) {
        match progress.phase {
            BatchPhase::Process => {
                log_batch_progress!(progress.index, progress.total, progress.file_path.display());
            }
            BatchPhase::Close => {
                tracing::debug!(
                    index = progress.index,
                    total = progress.total,
                    file = %progress.file_path.display(),
                    "Closed file"
                );
            }
        }
    }
}
