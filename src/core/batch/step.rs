//! Process step capability
//!
//! A batch runs an ordered list of [`ProcessStep`]s against every document.
//! New operations are added by implementing the trait.

use super::cancel::CancellationSignal;
use crate::adapters::host::HostDocument;
use crate::audit::AuditLogger;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Succeeded,
    Failed,
    /// The step observed cancellation and stopped early
    Canceled,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Succeeded => write!(f, "succeeded"),
            StepStatus::Failed => write!(f, "failed"),
            StepStatus::Canceled => write!(f, "canceled"),
        }
    }
}

/// Outcome of one step on one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    pub step_id: String,
    pub status: StepStatus,
    pub message: String,
}

impl ProcessResult {
    pub fn ok(step_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            status: StepStatus::Succeeded,
            message: message.into(),
        }
    }

    pub fn fail(step_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            status: StepStatus::Failed,
            message: message.into(),
        }
    }

    pub fn canceled(step_id: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            status: StepStatus::Canceled,
            message: "Canceled.".to_string(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == StepStatus::Succeeded
    }

    pub fn is_canceled(&self) -> bool {
        self.status == StepStatus::Canceled
    }
}

/// What a step knows about the file it runs on
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub file_path: &'a Path,
    /// 1-based position in the batch
    pub index: usize,
    pub total: usize,
    /// Document extension without the dot
    pub extension: &'a str,
    pub save_compact: bool,
    pub audit: &'a AuditLogger,
}

/// One pluggable batch operation
///
/// Steps check `cancel` at safe points and return
/// [`ProcessResult::canceled`] rather than an error. Failures are reported
/// through the result; a step never aborts the batch.
#[async_trait]
pub trait ProcessStep: Send + Sync {
    /// Stable identifier used in configuration
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Whether running the step may leave the document modified
    fn might_modify_document(&self) -> bool;

    async fn execute(
        &self,
        ctx: &StepContext<'_>,
        doc: &mut dyn HostDocument,
        cancel: &CancellationSignal,
    ) -> ProcessResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_constructors() {
        let ok = ProcessResult::ok("open_and_save", "Document saved.");
        assert!(ok.success());

        let failed = ProcessResult::fail("open_and_save", "Error: disk full");
        assert!(!failed.success());
        assert_eq!(failed.status, StepStatus::Failed);

        let canceled = ProcessResult::canceled("open_and_save");
        assert!(canceled.is_canceled());
        assert!(!canceled.success());
        assert_eq!(canceled.message, "Canceled.");
    }
}
