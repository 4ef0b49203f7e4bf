//! Batch process pipeline
//!
//! Files are processed strictly one at a time: open, run every step, save if
//! modified, close. The document is closed on every path, including a step
//! that panics or a failed save, before the next file is opened.

use super::cancel::CancellationSignal;
use super::progress::{BatchPhase, BatchProgress, ProgressReporter, TracingProgress};
use super::step::{ProcessResult, ProcessStep, StepContext};
use crate::adapters::host::{DocumentHandle, HostApplication, OpenOptions, SaveOptions};
use crate::audit::AuditLogger;
use crate::config::schema::BatchConfig;
use crate::domain::{Result, SetportError};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How documents are opened and saved during a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub detach: bool,
    pub save_compact: bool,
    /// Document extension without the dot
    pub extension: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::from(&BatchConfig::default())
    }
}

impl From<&BatchConfig> for BatchOptions {
    fn from(config: &BatchConfig) -> Self {
        Self {
            detach: config.detach,
            save_compact: config.save_compact,
            extension: config.extension.trim_start_matches('.').to_string(),
        }
    }
}

/// One file's run through the pipeline
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub file_path: PathBuf,
    pub results: Vec<ProcessResult>,
    pub opened: bool,
    pub saved: bool,
    /// Cancellation was observed while this file was open
    pub canceled: bool,
    /// Open, save or close failure
    pub error: Option<String>,
}

impl BatchItem {
    fn new(file_path: &Path) -> Self {
        Self {
            file_path: file_path.to_path_buf(),
            results: Vec::new(),
            opened: false,
            saved: false,
            canceled: false,
            error: None,
        }
    }

    pub fn is_successful(&self) -> bool {
        self.error.is_none()
            && !self.canceled
            && self.results.iter().all(ProcessResult::success)
    }

    fn record_error(&mut self, error: String) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

/// Summary of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Items for every file that was started, in order
    pub items: Vec<BatchItem>,
    pub total_files: usize,
    /// Cancellation stopped the batch before every file was processed
    pub interrupted: bool,
    pub duration: Duration,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.is_successful()).count()
    }

    pub fn failed(&self) -> usize {
        self.items
            .iter()
            .filter(|i| !i.is_successful() && !i.canceled)
            .count()
    }

    /// Files that were never opened because of cancellation
    pub fn not_started(&self) -> usize {
        self.total_files - self.items.len()
    }

    pub fn is_successful(&self) -> bool {
        !self.interrupted && self.failed() == 0
    }

    pub fn log_summary(&self) {
        tracing::info!(
            total_files = self.total_files,
            succeeded = self.succeeded(),
            failed = self.failed(),
            not_started = self.not_started(),
            interrupted = self.interrupted,
            duration_ms = self.duration.as_millis() as u64,
            "Batch completed"
        );

        for item in self.items.iter().filter(|i| !i.is_successful()) {
            let failures: Vec<String> = item
                .results
                .iter()
                .filter(|r| !r.success())
                .map(|r| format!("{}: {}", r.step_id, r.message))
                .collect();
            tracing::warn!(
                file = %item.file_path.display(),
                error = %item.error.as_deref().unwrap_or_default(),
                steps = %failures.join("; "),
                canceled = item.canceled,
                "File did not complete cleanly"
            );
        }
    }
}

/// Runs an ordered list of steps over many documents
pub struct BatchPipeline {
    host: Arc<dyn HostApplication>,
    steps: Vec<Arc<dyn ProcessStep>>,
    options: BatchOptions,
    audit: Arc<AuditLogger>,
    reporter: Arc<dyn ProgressReporter>,
}

impl BatchPipeline {
    pub fn new(host: Arc<dyn HostApplication>, steps: Vec<Arc<dyn ProcessStep>>) -> Self {
        Self {
            host,
            steps,
            options: BatchOptions::default(),
            audit: Arc::new(AuditLogger::disabled()),
            reporter: Arc::new(TracingProgress),
        }
    }

    pub fn with_options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_audit_logger(mut self, audit: Arc<AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_progress(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Top-level files in `dir` whose extension matches, sorted by path
    pub fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        let extension = extension.trim_start_matches('.');
        let entries = std::fs::read_dir(dir).map_err(|e| {
            SetportError::NotFound(format!("Input folder {}: {e}", dir.display()))
        })?;

        let mut files: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(extension))
            })
            .collect();
        files.sort();
        Ok(files)
    }

    /// Process `files` in order
    ///
    /// Cancellation is checked before each file and before each step. Files
    /// after the point of cancellation are not opened.
    pub async fn run(&self, files: &[PathBuf], cancel: &CancellationSignal) -> BatchReport {
        let start_time = Instant::now();
        let total = files.len();
        let mut report = BatchReport {
            total_files: total,
            ..BatchReport::default()
        };

        tracing::info!(
            files = total,
            steps = self.steps.len(),
            "Starting batch"
        );

        for (position, path) in files.iter().enumerate() {
            if cancel.is_canceled() {
                tracing::warn!(remaining = total - position, "Batch canceled");
                report.interrupted = true;
                break;
            }

            let index = position + 1;
            self.emit(index, total, path, BatchPhase::Process);
            let item = self.process_file(index, total, path, cancel).await;
            self.emit(index, total, path, BatchPhase::Close);

            let canceled = item.canceled;
            report.items.push(item);
            if canceled {
                report.interrupted = true;
                break;
            }

            tokio::task::yield_now().await;
        }

        report.duration = start_time.elapsed();
        report.log_summary();
        report
    }

    fn emit(&self, index: usize, total: usize, path: &Path, phase: BatchPhase) {
        self.reporter.report(&BatchProgress {
            index,
            total,
            file_path: path.to_path_buf(),
            phase,
        });
    }

    async fn process_file(
        &self,
        index: usize,
        total: usize,
        path: &Path,
        cancel: &CancellationSignal,
    ) -> BatchItem {
        let mut item = BatchItem::new(path);
        let open_options = OpenOptions {
            detach_from_central: self.options.detach,
        };

        let mut handle = match DocumentHandle::open(self.host.as_ref(), path, &open_options) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(file = %path.display(), error = %e, "Failed to open file");
                item.record_error(e.to_string());
                return item;
            }
        };
        item.opened = true;

        let ctx = StepContext {
            file_path: path,
            index,
            total,
            extension: &self.options.extension,
            save_compact: self.options.save_compact,
            audit: self.audit.as_ref(),
        };

        for step in &self.steps {
            if cancel.is_canceled() {
                item.canceled = true;
                break;
            }

            let execution = AssertUnwindSafe(step.execute(&ctx, handle.document_mut(), cancel))
                .catch_unwind()
                .await;
            let result = match execution {
                Ok(result) => result,
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    tracing::error!(
                        file = %path.display(),
                        step = step.id(),
                        panic = %message,
                        "Process step panicked"
                    );
                    ProcessResult::fail(step.id(), format!("Error: step panicked: {message}"))
                }
            };

            if !result.success() {
                tracing::warn!(
                    file = %path.display(),
                    step = step.id(),
                    status = %result.status,
                    message = %result.message,
                    "Process step did not succeed"
                );
            }

            let canceled = result.is_canceled();
            item.results.push(result);
            if canceled {
                item.canceled = true;
                break;
            }
        }

        // A canceled file is closed without saving
        if !item.canceled && handle.document().is_modified() {
            match handle.document_mut().save(&SaveOptions {
                compact: self.options.save_compact,
            }) {
                Ok(()) => item.saved = true,
                Err(e) => {
                    tracing::error!(file = %path.display(), error = %e, "Failed to save file");
                    item.record_error(e.to_string());
                }
            }
        }

        if let Err(e) = handle.close() {
            tracing::warn!(file = %path.display(), error = %e, "Failed to close file");
            item.record_error(e.to_string());
        }

        item
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
