//! Save the document when it has unsaved changes

use crate::adapters::host::{HostDocument, SaveOptions};
use crate::core::batch::cancel::CancellationSignal;
use crate::core::batch::step::{ProcessResult, ProcessStep, StepContext};
use async_trait::async_trait;

pub const OPEN_AND_SAVE_ID: &str = "open_and_save";

/// Opens a document and saves it if modified; performs no edits
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAndSave;

#[async_trait]
impl ProcessStep for OpenAndSave {
    fn id(&self) -> &str {
        OPEN_AND_SAVE_ID
    }

    fn name(&self) -> &str {
        "Open and Save"
    }

    fn description(&self) -> &str {
        "Opens and saves the document."
    }

    fn might_modify_document(&self) -> bool {
        true
    }

    async fn execute(
        &self,
        ctx: &StepContext<'_>,
        doc: &mut dyn HostDocument,
        cancel: &CancellationSignal,
    ) -> ProcessResult {
        if cancel.is_canceled() {
            return ProcessResult::canceled(self.id());
        }

        if !doc.is_modified() {
            return ProcessResult::ok(self.id(), "No changes to save.");
        }

        match doc.save(&SaveOptions {
            compact: ctx.save_compact,
        }) {
            Ok(()) => ProcessResult::ok(self.id(), "Document saved."),
            Err(e) => ProcessResult::fail(self.id(), format!("Error: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::host::OpenOptions;
    use crate::adapters::model::{ModelDocument, ModelFile};
    use crate::audit::AuditLogger;
    use tempfile::TempDir;

    fn context<'a>(path: &'a std::path::Path, audit: &'a AuditLogger) -> StepContext<'a> {
        StepContext {
            file_path: path,
            index: 1,
            total: 1,
            extension: "rvt",
            save_compact: true,
            audit,
        }
    }

    #[tokio::test]
    async fn test_unmodified_document_is_not_saved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.rvt");
        ModelFile::new("A").write(&path).unwrap();
        let mut doc = ModelDocument::open(&path, &OpenOptions::default()).unwrap();
        let audit = AuditLogger::disabled();

        let result = OpenAndSave
            .execute(&context(&path, &audit), &mut doc, &CancellationSignal::never())
            .await;
        assert!(result.success());
        assert_eq!(result.message, "No changes to save.");
    }

    #[tokio::test]
    async fn test_modified_document_is_saved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.rvt");
        ModelFile::new("A").write(&path).unwrap();
        let mut doc = ModelDocument::open(
            &path,
            &OpenOptions {
                detach_from_central: true,
            },
        )
        .unwrap();
        let audit = AuditLogger::disabled();

        let result = OpenAndSave
            .execute(&context(&path, &audit), &mut doc, &CancellationSignal::never())
            .await;
        assert_eq!(result.message, "Document saved.");
        assert!(!doc.is_modified());
    }

    #[tokio::test]
    async fn test_canceled() {
        let mut doc = ModelDocument::from_model(ModelFile::new("A"));
        let audit = AuditLogger::disabled();
        let (tx, cancel) = CancellationSignal::channel();
        tx.send(true).unwrap();

        let result = OpenAndSave
            .execute(&context(std::path::Path::new("a.rvt"), &audit), &mut doc, &cancel)
            .await;
        assert!(result.is_canceled());
    }
}
