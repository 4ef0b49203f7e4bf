//! Built-in process steps and lookup by id

mod audit_selection_sets;
mod cleanup_backups;
mod open_and_save;

pub use audit_selection_sets::{AuditSelectionSets, AUDIT_SELECTION_SETS_ID};
pub use cleanup_backups::{CleanupBackups, CLEANUP_BACKUPS_ID};
pub use open_and_save::{OpenAndSave, OPEN_AND_SAVE_ID};

use super::step::ProcessStep;
use crate::domain::{Result, SetportError};
use std::sync::Arc;

/// Every built-in step, in display order
pub fn available_steps() -> Vec<Arc<dyn ProcessStep>> {
    let steps: [Arc<dyn ProcessStep>; 3] = [
        Arc::new(OpenAndSave),
        Arc::new(AuditSelectionSets),
        Arc::new(CleanupBackups),
    ];
    steps.into()
}

/// Look up steps by id, keeping the requested order
///
/// Ids match case-insensitively and `-` is accepted for `_`.
///
/// # Errors
///
/// Returns [`SetportError::Configuration`] naming the first unknown id.
pub fn resolve_steps<S: AsRef<str>>(ids: &[S]) -> Result<Vec<Arc<dyn ProcessStep>>> {
    let available = available_steps();
    ids.iter()
        .map(|id| {
            let wanted = id.as_ref().trim().replace('-', "_");
            available
                .iter()
                .find(|step| step.id().eq_ignore_ascii_case(&wanted))
                .cloned()
                .ok_or_else(|| {
                    let known: Vec<&str> = available.iter().map(|s| s.id()).collect();
                    SetportError::Configuration(format!(
                        "Unknown process step '{}'. Available steps: {}",
                        id.as_ref(),
                        known.join(", ")
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("open_and_save", OPEN_AND_SAVE_ID ; "exact id")]
    #[test_case("Open-And-Save", OPEN_AND_SAVE_ID ; "case and dashes")]
    #[test_case(" cleanup_backups ", CLEANUP_BACKUPS_ID ; "surrounding whitespace")]
    #[test_case("AUDIT_SELECTION_SETS", AUDIT_SELECTION_SETS_ID ; "upper case")]
    fn test_resolve_single(input: &str, expected: &str) {
        let steps = resolve_steps(&[input]).unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].id(), expected);
    }

    #[test]
    fn test_resolve_keeps_order() {
        let steps = resolve_steps(&["cleanup_backups", "open_and_save"]).unwrap();
        let ids: Vec<_> = steps.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![CLEANUP_BACKUPS_ID, OPEN_AND_SAVE_ID]);
    }

    #[test]
    fn test_unknown_step_is_configuration_error() {
        let Err(err) = resolve_steps(&["open_and_save", "purge_views"]) else {
            panic!("unknown step id should not resolve");
        };
        assert!(matches!(err, SetportError::Configuration(_)));
        assert!(err.to_string().contains("purge_views"));
    }

    #[test]
    fn test_available_steps_have_unique_ids() {
        let steps = available_steps();
        let mut ids: Vec<_> = steps.iter().map(|s| s.id().to_string()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), steps.len());
    }
}
