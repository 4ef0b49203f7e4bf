//! Remove incremental backups next to the document

use crate::adapters::host::HostDocument;
use crate::core::batch::cancel::CancellationSignal;
use crate::core::batch::step::{ProcessResult, ProcessStep, StepContext};
use crate::core::export::cleanup::delete_backup_files;
use async_trait::async_trait;

pub const CLEANUP_BACKUPS_ID: &str = "cleanup_backups";

#[derive(Debug, Clone, Copy, Default)]
pub struct CleanupBackups;

#[async_trait]
impl ProcessStep for CleanupBackups {
    fn id(&self) -> &str {
        CLEANUP_BACKUPS_ID
    }

    fn name(&self) -> &str {
        "Cleanup Backups"
    }

    fn description(&self) -> &str {
        "Deletes numbered backup files in the document's folder."
    }

    fn might_modify_document(&self) -> bool {
        false
    }

    async fn execute(
        &self,
        ctx: &StepContext<'_>,
        _doc: &mut dyn HostDocument,
        cancel: &CancellationSignal,
    ) -> ProcessResult {
        if cancel.is_canceled() {
            return ProcessResult::canceled(self.id());
        }

        let Some(dir) = ctx.file_path.parent() else {
            return ProcessResult::ok(self.id(), "No folder to clean.");
        };
        let removed = delete_backup_files(dir, ctx.extension, &[ctx.file_path.to_path_buf()]);
        ProcessResult::ok(self.id(), format!("Removed {removed} backup file(s)."))
    }
}
