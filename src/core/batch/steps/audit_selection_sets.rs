//! Write per-category member counts of every selection set to the audit log

use crate::adapters::host::HostDocument;
use crate::audit::AuditEntry;
use crate::core::batch::cancel::CancellationSignal;
use crate::core::batch::step::{ProcessResult, ProcessStep, StepContext};
use crate::core::catalog::list_selection_sets;
use async_trait::async_trait;
use std::collections::BTreeMap;

pub const AUDIT_SELECTION_SETS_ID: &str = "audit_selection_sets";

/// Category recorded for members the host cannot categorize
const UNCATEGORIZED: &str = "(none)";

#[derive(Debug, Clone, Copy, Default)]
pub struct AuditSelectionSets;

#[async_trait]
impl ProcessStep for AuditSelectionSets {
    fn id(&self) -> &str {
        AUDIT_SELECTION_SETS_ID
    }

    fn name(&self) -> &str {
        "Audit Selection Sets"
    }

    fn description(&self) -> &str {
        "Records member counts per category for each selection set."
    }

    fn might_modify_document(&self) -> bool {
        false
    }

    async fn execute(
        &self,
        ctx: &StepContext<'_>,
        doc: &mut dyn HostDocument,
        cancel: &CancellationSignal,
    ) -> ProcessResult {
        let sets = match list_selection_sets(doc) {
            Ok(sets) => sets,
            Err(e) => return ProcessResult::fail(self.id(), format!("Error: {e}")),
        };

        let mut rows = 0;
        for set in &sets {
            if cancel.is_canceled() {
                return ProcessResult::canceled(self.id());
            }

            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for &id in &set.members {
                let category = match doc.category(id) {
                    Ok(Some(category)) => category.to_string(),
                    Ok(None) | Err(_) => UNCATEGORIZED.to_string(),
                };
                *counts.entry(category).or_default() += 1;
            }

            for (category, count) in counts {
                let entry = AuditEntry::new(doc.title(), &set.name)
                    .with_document_path(doc.path().or(Some(ctx.file_path)))
                    .with_category(category)
                    .with_element_count(count)
                    .with_notes("Selection set audit");
                if let Err(e) = ctx.audit.log(&entry) {
                    return ProcessResult::fail(self.id(), format!("Error: {e}"));
                }
                rows += 1;
            }
        }

        ProcessResult::ok(
            self.id(),
            format!("Audited {} selection set(s), {rows} row(s).", sets.len()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::model::{ModelDocument, ModelElement, ModelFile};
    use crate::audit::{AuditLogger, AUDIT_HEADER};
    use std::path::Path;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_one_row_per_set_and_category() {
        let dir = TempDir::new().unwrap();
        let audit_path = dir.path().join("audit.csv");
        let audit = AuditLogger::new(&audit_path);

        let mut model = ModelFile::new("Tower");
        let w1 = model.add_element(|id| ModelElement::new(id, "walls"));
        let w2 = model.add_element(|id| ModelElement::new(id, "walls"));
        let door = model.add_element(|id| ModelElement::new(id, "doors"));
        model.add_selection_set("Kitchen", vec![w1, w2, door]);
        model.add_selection_set("Bath", vec![w1]);
        let mut doc = ModelDocument::from_model(model);

        let ctx = StepContext {
            file_path: Path::new("/models/tower.rvt"),
            index: 1,
            total: 1,
            extension: "rvt",
            save_compact: true,
            audit: &audit,
        };
        let result = AuditSelectionSets
            .execute(&ctx, &mut doc, &CancellationSignal::never())
            .await;
        assert!(result.success(), "{}", result.message);
        assert_eq!(result.message, "Audited 2 selection set(s), 3 row(s).");

        let content = std::fs::read_to_string(&audit_path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], AUDIT_HEADER);
        assert_eq!(lines.len(), 4);
        assert!(content.contains("\"Kitchen\",\"walls\",2,"));
        assert!(content.contains("\"Kitchen\",\"doors\",1,"));
        assert!(content.contains("\"/models/tower.rvt\""));
    }
}
