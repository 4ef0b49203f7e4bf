//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results,
//! one [`SetReport`] per selection set.

use crate::domain::errors::{FailureKind, SetportError};
use crate::domain::geometry::RecenterTranslation;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one selection set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetStatus {
    /// Artifact written (and post-processed when requested)
    Exported,
    /// The set failed; later sets were still processed
    Failed,
    /// Nothing was written (dry run or cancellation)
    Skipped,
}

impl fmt::Display for SetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetStatus::Exported => write!(f, "exported"),
            SetStatus::Failed => write!(f, "failed"),
            SetStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// Stage of the per-set workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Capture,
    Write,
    Open,
    Resolve,
    Recenter,
    Save,
    Close,
    Verify,
}

impl fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportPhase::Capture => "capture",
            ExportPhase::Write => "write",
            ExportPhase::Open => "open",
            ExportPhase::Resolve => "resolve",
            ExportPhase::Recenter => "recenter",
            ExportPhase::Save => "save",
            ExportPhase::Close => "close",
            ExportPhase::Verify => "verify",
        };
        write!(f, "{name}")
    }
}

/// Result of exporting one selection set
#[derive(Debug, Clone)]
pub struct SetReport {
    pub set_name: String,
    pub status: SetStatus,
    pub output_path: PathBuf,

    /// Members whose durable identity was captured from the source
    pub captured_members: usize,

    /// Captured members found again in the artifact
    pub resolved_members: usize,

    /// Translation applied by recentering, if any
    pub translation: Option<RecenterTranslation>,

    /// SHA-256 of the final artifact
    pub checksum: Option<String>,

    /// Failure message or informational note
    pub message: Option<String>,

    /// Non-fatal observations (unresolved members, skipped recenter)
    pub warnings: Vec<String>,

    pub failure_kind: Option<FailureKind>,

    /// Stage the failure happened in
    pub phase: Option<ExportPhase>,
}

impl SetReport {
    fn new(set_name: impl Into<String>, status: SetStatus, output_path: PathBuf) -> Self {
        Self {
            set_name: set_name.into(),
            status,
            output_path,
            captured_members: 0,
            resolved_members: 0,
            translation: None,
            checksum: None,
            message: None,
            warnings: Vec::new(),
            failure_kind: None,
            phase: None,
        }
    }

    pub fn exported(set_name: impl Into<String>, output_path: PathBuf) -> Self {
        Self::new(set_name, SetStatus::Exported, output_path)
    }

    pub fn skipped(
        set_name: impl Into<String>,
        output_path: PathBuf,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(set_name, SetStatus::Skipped, output_path).with_message(reason)
    }

    /// A failed set, classified from `error`
    pub fn failed(
        set_name: impl Into<String>,
        output_path: PathBuf,
        phase: ExportPhase,
        error: &SetportError,
    ) -> Self {
        let mut report = Self::new(set_name, SetStatus::Failed, output_path);
        report.failure_kind = Some(error.failure_kind());
        report.phase = Some(phase);
        report.message = Some(error.to_string());
        report
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_captured(mut self, captured: usize) -> Self {
        self.captured_members = captured;
        self
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn is_failed(&self) -> bool {
        self.status == SetStatus::Failed
    }

    /// One-line description for summaries and audit notes
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(message) = &self.message {
            parts.push(message.clone());
        }
        if let Some(translation) = &self.translation {
            parts.push(format!("recentered by {translation}"));
        }
        parts.extend(self.warnings.iter().cloned());
        if let Some(checksum) = &self.checksum {
            parts.push(format!("sha256={checksum}"));
        }
        parts.join("; ")
    }
}

/// Summary of an export operation
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Per-set reports in processing order
    pub reports: Vec<SetReport>,

    /// Whether the source document was saved before exporting
    pub source_saved: bool,

    /// Duration of the export
    pub duration: Duration,

    /// Whether the export was interrupted by a shutdown signal
    pub interrupted: bool,

    /// Reason for shutdown (if interrupted)
    pub shutdown_reason: Option<String>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn add_report(&mut self, report: SetReport) {
        self.reports.push(report);
    }

    pub fn report(&self, set_name: &str) -> Option<&SetReport> {
        self.reports.iter().find(|r| r.set_name == set_name)
    }

    pub fn total_sets(&self) -> usize {
        self.reports.len()
    }

    pub fn succeeded(&self) -> usize {
        self.count(SetStatus::Exported)
    }

    pub fn failed(&self) -> usize {
        self.count(SetStatus::Failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(SetStatus::Skipped)
    }

    fn count(&self, status: SetStatus) -> usize {
        self.reports.iter().filter(|r| r.status == status).count()
    }

    /// Check if the export was successful (no failed sets)
    pub fn is_successful(&self) -> bool {
        self.failed() == 0
    }

    /// Mark the summary as interrupted
    pub fn mark_interrupted(&mut self, reason: impl Into<String>) {
        self.interrupted = true;
        self.shutdown_reason = Some(reason.into());
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_sets = self.total_sets(),
            exported = self.succeeded(),
            failed = self.failed(),
            skipped = self.skipped(),
            source_saved = self.source_saved,
            interrupted = self.interrupted,
            duration_ms = self.duration.as_millis() as u64,
            "Export completed"
        );

        for report in self.reports.iter().filter(|r| r.is_failed()) {
            tracing::warn!(
                set_name = %report.set_name,
                failure_kind = ?report.failure_kind,
                phase = ?report.phase,
                message = %report.message.as_deref().unwrap_or_default(),
                "Set export failed"
            );
        }
    }
}
