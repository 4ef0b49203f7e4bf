//! Export coordinator - main orchestrator for the export process
//!
//! This module coordinates the per-set workflow: identity capture from the
//! source document, artifact writing, optional recentering inside the artifact,
//! verification and audit. One set's failure never stops the sets after it.

use super::settings::{ExportJob, ExportSettings};
use super::summary::{ExportPhase, ExportSummary, SetReport, SetStatus};
use super::writer::{ArtifactWriter, WrittenArtifact};
use crate::adapters::host::{
    DocumentHandle, HostApplication, HostDocument, OpenOptions, SaveAsOptions, SaveOptions,
};
use crate::audit::{AuditEntry, AuditLogger};
use crate::config::schema::{ArtifactMode, UnresolvedMemberPolicy};
use crate::core::batch::CancellationSignal;
use crate::core::catalog::{find_selection_set, list_selection_sets};
use crate::core::identity::{capture_ordered, resolve_ordered};
use crate::core::recenter::{RecenterEngine, RecenterOutcome};
use crate::core::verification::file_checksum;
use crate::domain::{Result, SetportError};
use crate::{log_error_with_context, log_set_export_complete, log_set_export_start};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// A set named in the settings, planned before anything is written
enum PlannedSet {
    Ready(ExportJob),
    Missing {
        set_name: String,
        output_path: PathBuf,
    },
    /// Sanitizes to the artifact path of an earlier set
    SharedOutput { job: ExportJob, first: String },
}

impl PlannedSet {
    fn set_name(&self) -> &str {
        match self {
            PlannedSet::Ready(job) | PlannedSet::SharedOutput { job, .. } => &job.set_name,
            PlannedSet::Missing { set_name, .. } => set_name,
        }
    }

    fn output_path(&self) -> &Path {
        match self {
            PlannedSet::Ready(job) | PlannedSet::SharedOutput { job, .. } => &job.output_path,
            PlannedSet::Missing { output_path, .. } => output_path,
        }
    }
}

type StepFailure = (ExportPhase, SetportError);

/// Export coordinator
pub struct ExportCoordinator {
    host: Arc<dyn HostApplication>,
    settings: ExportSettings,
    writer: ArtifactWriter,
    recenter: RecenterEngine,
    audit: Arc<AuditLogger>,
    cancel: CancellationSignal,
}

impl ExportCoordinator {
    /// Create a new export coordinator
    ///
    /// `host` is used to re-open artifacts for post-processing.
    pub fn new(
        host: Arc<dyn HostApplication>,
        settings: ExportSettings,
        cancel: CancellationSignal,
    ) -> Self {
        let writer = ArtifactWriter::new(settings.model_extension.clone())
            .with_cleanup(settings.cleanup_backups);
        let recenter = RecenterEngine::new(settings.anchor_category.clone());

        Self {
            host,
            settings,
            writer,
            recenter,
            audit: Arc::new(AuditLogger::disabled()),
            cancel,
        }
    }

    /// Record one audit row per processed set
    pub fn with_audit_logger(mut self, audit: Arc<AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    /// Execute the export
    ///
    /// This is the main entry point for the export process. It:
    /// 1. Validates settings (a failure here halts before any set)
    /// 2. Saves the source document if requested and modified
    /// 3. Reads the selection-set catalog
    /// 4. Captures durable identity tokens for every selected set
    /// 5. For each set, in order: writes the artifact, post-processes it
    ///    (recenter and/or detach), checksums it and records an audit row
    /// 6. Generates the summary report
    ///
    /// Per-set failures are recorded in the summary. Only configuration
    /// problems, a failed pre-export save or an unreadable catalog are
    /// returned as errors.
    pub async fn execute_export(&self, source: &mut dyn HostDocument) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();

        tracing::info!(
            document = %source.title(),
            output_dir = %self.settings.output_dir.display(),
            dry_run = self.settings.dry_run,
            "Starting export process"
        );

        self.settings.validate()?;
        if !self.settings.dry_run
            && self.settings.artifact_mode == ArtifactMode::Copy
            && source.path().is_none()
        {
            return Err(SetportError::Configuration(
                "Copy mode needs a source document that has been saved to disk".to_string(),
            ));
        }

        if self.settings.save_before_export && !self.settings.dry_run && source.is_modified() {
            source
                .save(&SaveOptions {
                    compact: self.settings.compact,
                })
                .map_err(|e| {
                    log_error_with_context!(&e, "Failed to save source document before export");
                    SetportError::from(e)
                })?;
            summary.source_saved = true;
            tracing::info!(document = %source.title(), "Saved source document before export");
        }

        let plan = self.plan(source)?;
        tracing::info!(sets = plan.len(), "Captured selection set identities");

        // Backup cleanup must never take an artifact of this run
        let artifacts: Vec<PathBuf> = plan
            .iter()
            .filter(|planned| matches!(planned, PlannedSet::Ready(_)))
            .map(|planned| planned.output_path().to_path_buf())
            .collect();

        let mut remaining = plan.into_iter();
        while let Some(planned) = remaining.next() {
            if self.cancel.is_canceled() {
                summary.mark_interrupted("Cancellation requested");
                tracing::warn!("Export canceled, skipping remaining sets");
                for skipped in std::iter::once(planned).chain(remaining.by_ref()) {
                    summary.add_report(SetReport::skipped(
                        skipped.set_name(),
                        skipped.output_path().to_path_buf(),
                        "Canceled before export",
                    ));
                }
                break;
            }

            let set_start = Instant::now();
            let report = match planned {
                PlannedSet::Missing {
                    set_name,
                    output_path,
                } => {
                    let error = SetportError::NotFound(format!(
                        "Selection set '{set_name}' is not defined"
                    ));
                    SetReport::failed(set_name, output_path, ExportPhase::Capture, &error)
                }
                PlannedSet::SharedOutput { job, first } => {
                    let error = SetportError::Validation(format!(
                        "Selection set '{}' would write {}, already used by set '{first}'",
                        job.set_name,
                        job.output_path.display()
                    ));
                    tracing::warn!(
                        set_name = %job.set_name,
                        first = %first,
                        "Artifact name collision"
                    );
                    SetReport::failed(job.set_name, job.output_path, ExportPhase::Capture, &error)
                        .with_captured(job.tokens.len())
                }
                PlannedSet::Ready(job) if self.settings.dry_run => {
                    let report = SetReport::skipped(
                        job.set_name.clone(),
                        job.output_path.clone(),
                        format!("Dry run: would write {}", job.output_path.display()),
                    )
                    .with_captured(job.tokens.len());
                    self.apply_capture_policy(&job, report)
                }
                PlannedSet::Ready(job) => self.export_set(source, &job, &artifacts),
            };

            log_set_export_complete!(report.set_name, report.status, set_start.elapsed());
            if report.status != SetStatus::Skipped {
                self.record_audit(source, &report);
            }
            summary.add_report(report);

            tokio::task::yield_now().await;
        }

        summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }

    /// Read the catalog and capture tokens for every selected set up front
    fn plan(&self, source: &dyn HostDocument) -> Result<Vec<PlannedSet>> {
        let catalog = list_selection_sets(source)?;

        let selected: Vec<PlannedSet> = if self.settings.set_names.is_empty() {
            catalog
                .iter()
                .map(|set| PlannedSet::Ready(self.job_for(source, &set.name, &set.members)))
                .collect()
        } else {
            self.settings
                .set_names
                .iter()
                .map(|name| match find_selection_set(&catalog, name) {
                    Some(set) => PlannedSet::Ready(self.job_for(source, &set.name, &set.members)),
                    None => {
                        tracing::warn!(set_name = %name, "Selection set not found in document");
                        PlannedSet::Missing {
                            set_name: name.clone(),
                            output_path: self.settings.output_path_for(name),
                        }
                    }
                })
                .collect()
        };

        Ok(reject_shared_outputs(selected))
    }

    fn job_for(
        &self,
        source: &dyn HostDocument,
        set_name: &str,
        members: &[crate::domain::ElementId],
    ) -> ExportJob {
        let captured = capture_ordered(source, members);
        ExportJob {
            set_name: set_name.to_string(),
            source_member_count: members.len(),
            missing_identity: captured.missing,
            tokens: captured.tokens,
            output_path: self.settings.output_path_for(set_name),
        }
    }

    /// Run the whole workflow for one set; never fails, the report says how it went
    ///
    /// `artifacts` lists every output of this run; backup cleanup keeps them.
    fn export_set(
        &self,
        source: &mut dyn HostDocument,
        job: &ExportJob,
        artifacts: &[PathBuf],
    ) -> SetReport {
        log_set_export_start!(job.set_name, job.source_member_count);

        let report = SetReport::exported(job.set_name.clone(), job.output_path.clone())
            .with_captured(job.tokens.len());
        let mut report = self.apply_capture_policy(job, report);

        if let Err((phase, error)) = self.write_artifact(source, job) {
            return self.failure(job, phase, &error, report);
        }
        self.writer.cleanup_after(&job.output_path, artifacts);

        if self.settings.recenter_xy || self.settings.detach {
            if let Err((phase, error)) = self.post_process(job, &mut report) {
                return self.failure(job, phase, &error, report);
            }
            self.writer.cleanup_after(&job.output_path, artifacts);
        }

        // A missing or unreadable artifact is not an export
        match file_checksum(&job.output_path) {
            Ok(checksum) => report.checksum = Some(checksum),
            Err(e) => return self.failure(job, ExportPhase::Verify, &e, report),
        }

        report
    }

    fn failure(
        &self,
        job: &ExportJob,
        phase: ExportPhase,
        error: &SetportError,
        partial: SetReport,
    ) -> SetReport {
        tracing::error!(
            set_name = %job.set_name,
            phase = %phase,
            error = %error,
            "Selection set export failed"
        );
        let mut report =
            SetReport::failed(job.set_name.clone(), job.output_path.clone(), phase, error)
                .with_captured(partial.captured_members);
        report.resolved_members = partial.resolved_members;
        report.warnings = partial.warnings;
        report
    }

    fn apply_capture_policy(&self, job: &ExportJob, mut report: SetReport) -> SetReport {
        if self.settings.unresolved_members == UnresolvedMemberPolicy::Report
            && job.missing_identity > 0
        {
            report.add_warning(format!(
                "{} member(s) have no durable identity",
                job.missing_identity
            ));
        }
        report
    }

    fn write_artifact(
        &self,
        source: &mut dyn HostDocument,
        job: &ExportJob,
    ) -> std::result::Result<WrittenArtifact, StepFailure> {
        let written = match self.settings.artifact_mode {
            ArtifactMode::Copy => {
                let Some(source_path) = source.path().map(|p| p.to_path_buf()) else {
                    return Err((
                        ExportPhase::Write,
                        SetportError::Configuration(
                            "Copy mode needs a saved source document".to_string(),
                        ),
                    ));
                };
                self.writer
                    .write(&source_path, &job.output_path, self.settings.overwrite)
            }
            ArtifactMode::SaveAs => {
                let options = SaveAsOptions {
                    compact: self.settings.compact,
                    preview: self.settings.preview,
                    overwrite: self.settings.overwrite,
                };
                self.writer.write_from_document(
                    source,
                    &job.output_path,
                    self.settings.overwrite,
                    &options,
                )
            }
        };
        written.map_err(|e| (ExportPhase::Write, e))
    }

    /// Open the artifact, recenter and/or detach it, save and close
    ///
    /// The artifact is closed on every path, including failures.
    fn post_process(
        &self,
        job: &ExportJob,
        report: &mut SetReport,
    ) -> std::result::Result<(), StepFailure> {
        let options = OpenOptions {
            detach_from_central: self.settings.detach,
        };
        let mut handle = DocumentHandle::open(self.host.as_ref(), &job.output_path, &options)
            .map_err(|e| (ExportPhase::Open, SetportError::from(e)))?;

        let result = self.process_artifact(job, handle.document_mut(), report);
        let closed = handle.close();

        result?;
        closed.map_err(|e| (ExportPhase::Close, SetportError::from(e)))
    }

    fn process_artifact(
        &self,
        job: &ExportJob,
        doc: &mut dyn HostDocument,
        report: &mut SetReport,
    ) -> std::result::Result<(), StepFailure> {
        if job.has_resolvable_members() {
            let ids = resolve_ordered(doc, &job.tokens);
            report.resolved_members = ids.len();

            let unresolved = job.tokens.len() - ids.len();
            if unresolved > 0 {
                tracing::info!(
                    set_name = %job.set_name,
                    unresolved,
                    "Some members did not resolve in the artifact"
                );
                if self.settings.unresolved_members == UnresolvedMemberPolicy::Report {
                    report.add_warning(format!(
                        "{unresolved} member(s) did not resolve in the artifact"
                    ));
                }
            }

            if self.settings.recenter_xy {
                if ids.is_empty() {
                    report.add_warning("No members resolved in the artifact; recenter skipped");
                } else {
                    let outcome = self
                        .recenter
                        .center_to_origin(doc, &ids)
                        .map_err(|e| (ExportPhase::Recenter, e))?;
                    match outcome {
                        RecenterOutcome::Moved { translation, .. } => {
                            report.translation = Some(translation);
                        }
                        RecenterOutcome::NoGeometry => report.add_warning(format!(
                            "No {} geometry found; recenter skipped",
                            self.recenter.anchor()
                        )),
                        RecenterOutcome::NonFiniteCenter => {
                            report.add_warning("Footprint center is not finite; recenter skipped")
                        }
                        RecenterOutcome::EmptySelection => {}
                    }
                }
            }
        } else if self.settings.recenter_xy {
            report.add_warning("No members with a durable identity; recenter skipped");
        }

        if doc.is_modified() {
            doc.save(&SaveOptions {
                compact: self.settings.compact,
            })
            .map_err(|e| (ExportPhase::Save, SetportError::from(e)))?;
        }
        Ok(())
    }

    fn record_audit(&self, source: &dyn HostDocument, report: &SetReport) {
        let category = if report.translation.is_some() {
            self.recenter.anchor().to_string()
        } else {
            String::new()
        };
        let notes = match report.describe() {
            details if details.is_empty() => report.status.to_string(),
            details => format!("{}: {details}", report.status),
        };
        let entry = AuditEntry::new(source.title(), &report.set_name)
            .with_document_path(source.path())
            .with_category(category)
            .with_element_count(report.captured_members)
            .with_notes(notes);
        self.audit.log_or_warn(&entry);
    }
}

/// Fail every set whose artifact path an earlier set already claimed
///
/// Names are compared ignoring case, since `Kitchen.rvt` and `kitchen.rvt`
/// are one file on case-insensitive file systems.
fn reject_shared_outputs(planned: Vec<PlannedSet>) -> Vec<PlannedSet> {
    let mut claimed: HashMap<String, String> = HashMap::new();
    planned
        .into_iter()
        .map(|planned| match planned {
            PlannedSet::Ready(job) => {
                let key = job.output_path.to_string_lossy().to_lowercase();
                match claimed.entry(key) {
                    Entry::Occupied(first) => PlannedSet::SharedOutput {
                        first: first.get().clone(),
                        job,
                    },
                    Entry::Vacant(slot) => {
                        slot.insert(job.set_name.clone());
                        PlannedSet::Ready(job)
                    }
                }
            }
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::host::with_transaction;
    use crate::adapters::model::{ModelDocument, ModelElement, ModelFile, ModelHost};
    use crate::domain::errors::FailureKind;
    use crate::domain::geometry::{BoundingBox3, Point3};
    use crate::domain::{ElementId, HostError};
    use tempfile::TempDir;
    use test_case::test_case;

    fn wall(x0: f64, y0: f64, x1: f64, y1: f64) -> BoundingBox3 {
        BoundingBox3::new(Point3::new(x0, y0, 0.0), Point3::new(x1, y1, 3.0))
    }

    fn tower() -> ModelFile {
        let mut model = ModelFile::new("Tower");
        let a = model.add_element(|id| {
            ModelElement::new(id, "walls").with_bounds(wall(0.0, 0.0, 10.0, 10.0))
        });
        let b = model.add_element(|id| {
            ModelElement::new(id, "walls").with_bounds(wall(10.0, 0.0, 20.0, 10.0))
        });
        let c = model.add_element(|id| {
            ModelElement::new(id, "furniture").with_bounds(wall(100.0, 100.0, 101.0, 101.0))
        });
        let d = model.add_element(|id| ModelElement::new(id, "doors").with_unique_id(None));
        model.add_selection_set("Kitchen", vec![a, b, c]);
        model.add_selection_set("Bath", vec![a, d]);
        model
    }

    fn write_source(dir: &Path) -> PathBuf {
        let path = dir.join("tower.rvt");
        tower().write(&path).unwrap();
        path
    }

    fn lock_first_wall(doc: &mut dyn HostDocument) {
        let locked: Result<()> =
            with_transaction(doc, "Lock wall", |d| Ok(d.set_locked(ElementId::new(1), true)?));
        locked.unwrap();
        assert!(doc.is_modified());
    }

    fn coordinator(host: Arc<ModelHost>, settings: ExportSettings) -> ExportCoordinator {
        ExportCoordinator::new(host, settings, CancellationSignal::never())
    }

    #[tokio::test]
    async fn test_missing_set_is_reported_and_others_continue() {
        let dir = TempDir::new().unwrap();
        let source_path = write_source(dir.path());
        let mut source = ModelDocument::open(&source_path, &OpenOptions::default()).unwrap();
        let out = dir.path().join("out");

        let settings = ExportSettings::new(&out)
            .with_set_names(["Attic", "Bath"])
            .with_recenter(false);
        let summary = coordinator(Arc::new(ModelHost::new()), settings)
            .execute_export(&mut source)
            .await
            .unwrap();

        let attic = summary.report("Attic").unwrap();
        assert_eq!(attic.status, SetStatus::Failed);
        assert_eq!(attic.failure_kind, Some(FailureKind::NotFound));
        assert_eq!(summary.report("Bath").unwrap().status, SetStatus::Exported);
        assert!(out.join("Bath.rvt").exists());
    }

    #[tokio::test]
    async fn test_capture_policy_report_warns_about_missing_identity() {
        let dir = TempDir::new().unwrap();
        let source_path = write_source(dir.path());
        let mut source = ModelDocument::open(&source_path, &OpenOptions::default()).unwrap();

        let settings = ExportSettings::new(dir.path().join("out"))
            .with_set_names(["Bath"])
            .with_recenter(false)
            .with_unresolved_members(UnresolvedMemberPolicy::Report);
        let summary = coordinator(Arc::new(ModelHost::new()), settings)
            .execute_export(&mut source)
            .await
            .unwrap();

        let bath = summary.report("Bath").unwrap();
        assert_eq!(bath.captured_members, 1);
        assert!(bath.warnings.iter().any(|w| w.contains("no durable identity")));
    }

    #[tokio::test]
    async fn test_copy_mode_needs_saved_source() {
        let dir = TempDir::new().unwrap();
        let mut source = ModelDocument::from_model(ModelFile::new("Unsaved"));
        let err = coordinator(Arc::new(ModelHost::new()), ExportSettings::new(dir.path()))
            .execute_export(&mut source)
            .await
            .unwrap_err();
        assert!(matches!(err, SetportError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_cancellation_before_first_set() {
        let dir = TempDir::new().unwrap();
        let source_path = write_source(dir.path());
        let mut source = ModelDocument::open(&source_path, &OpenOptions::default()).unwrap();
        let (tx, signal) = CancellationSignal::channel();
        tx.send(true).unwrap();

        let summary = ExportCoordinator::new(
            Arc::new(ModelHost::new()),
            ExportSettings::new(dir.path().join("out")),
            signal,
        )
        .execute_export(&mut source)
        .await
        .unwrap();

        assert!(summary.interrupted);
        assert_eq!(summary.skipped(), 2);
        assert!(!dir.path().join("out").join("Kitchen.rvt").exists());
    }

    #[tokio::test]
    async fn test_save_as_mode_recenters() {
        let dir = TempDir::new().unwrap();
        let source_path = write_source(dir.path());
        let mut source = ModelDocument::open(&source_path, &OpenOptions::default()).unwrap();
        let host = Arc::new(ModelHost::new());

        let settings = ExportSettings::new(dir.path().join("out"))
            .with_set_names(["Kitchen"])
            .with_artifact_mode(ArtifactMode::SaveAs);
        let summary = coordinator(host.clone(), settings)
            .execute_export(&mut source)
            .await
            .unwrap();

        let kitchen = summary.report("Kitchen").unwrap();
        assert_eq!(kitchen.status, SetStatus::Exported, "{kitchen:?}");
        assert_eq!(kitchen.resolved_members, 3);
        let delta = kitchen.translation.unwrap().delta;
        assert_eq!((delta.x, delta.y, delta.z), (-10.0, -5.0, 0.0));
        assert!(kitchen.checksum.is_some());
        assert_eq!(host.open_documents(), 0);
    }

    #[test_case(false ; "copy only")]
    #[test_case(true ; "recentered")]
    #[tokio::test]
    async fn test_numbered_set_name_survives_backup_cleanup(recenter: bool) {
        let dir = TempDir::new().unwrap();
        let mut model = tower();
        let wall = ElementId::new(1);
        model.add_selection_set("Unit.101", vec![wall]);
        model.add_selection_set("Level.2024", vec![wall]);
        let source_path = dir.path().join("tower.rvt");
        model.write(&source_path).unwrap();
        let mut source = ModelDocument::open(&source_path, &OpenOptions::default()).unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();
        std::fs::write(out.join("Unit.101.0001.rvt"), b"backup").unwrap();

        let settings = ExportSettings::new(&out)
            .with_set_names(["Unit.101", "Level.2024"])
            .with_recenter(recenter);
        let summary = coordinator(Arc::new(ModelHost::new()), settings)
            .execute_export(&mut source)
            .await
            .unwrap();

        for name in ["Unit.101", "Level.2024"] {
            let report = summary.report(name).unwrap();
            assert_eq!(report.status, SetStatus::Exported, "{report:?}");
            assert!(report.checksum.is_some());
            assert!(report.output_path.exists());
        }
        assert!(!out.join("Unit.101.0001.rvt").exists());
    }

    #[tokio::test]
    async fn test_save_before_export_saves_modified_source_once() {
        let dir = TempDir::new().unwrap();
        let source_path = write_source(dir.path());
        let mut source = ModelDocument::open(&source_path, &OpenOptions::default()).unwrap();
        lock_first_wall(&mut source);
        let out = dir.path().join("out");

        let settings = ExportSettings::new(&out)
            .with_recenter(false)
            .with_save_before_export(true);
        let summary = coordinator(Arc::new(ModelHost::new()), settings)
            .execute_export(&mut source)
            .await
            .unwrap();

        assert!(summary.source_saved);
        assert!(!source.is_modified());
        assert!(summary.is_successful());
        for name in ["Bath", "Kitchen"] {
            let artifact = ModelFile::read(&out.join(format!("{name}.rvt"))).unwrap();
            assert!(artifact.element(ElementId::new(1)).unwrap().locked);
        }
    }

    #[tokio::test]
    async fn test_unmodified_source_is_not_saved() {
        let dir = TempDir::new().unwrap();
        let source_path = write_source(dir.path());
        let before = std::fs::read(&source_path).unwrap();
        let mut source = ModelDocument::open(&source_path, &OpenOptions::default()).unwrap();

        let settings = ExportSettings::new(dir.path().join("out"))
            .with_recenter(false)
            .with_save_before_export(true);
        let summary = coordinator(Arc::new(ModelHost::new()), settings)
            .execute_export(&mut source)
            .await
            .unwrap();

        assert!(!summary.source_saved);
        assert_eq!(std::fs::read(&source_path).unwrap(), before);
    }

    #[tokio::test]
    async fn test_failed_source_save_halts_before_any_set() {
        let dir = TempDir::new().unwrap();
        let mut source = ModelDocument::from_model(tower());
        lock_first_wall(&mut source);
        let out = dir.path().join("out");

        let settings = ExportSettings::new(&out)
            .with_artifact_mode(ArtifactMode::SaveAs)
            .with_save_before_export(true);
        let err = coordinator(Arc::new(ModelHost::new()), settings)
            .execute_export(&mut source)
            .await
            .unwrap_err();

        assert!(matches!(err, SetportError::Host(HostError::SaveFailed(_))));
        assert!(!out.exists());
    }

    #[test_case(false ; "without overwrite")]
    #[test_case(true ; "with overwrite")]
    #[tokio::test]
    async fn test_names_sharing_an_artifact_fail_the_later_set(overwrite: bool) {
        let dir = TempDir::new().unwrap();
        let mut model = tower();
        model.add_selection_set("A/B", vec![ElementId::new(1)]);
        model.add_selection_set("A:B", vec![ElementId::new(2)]);
        let source_path = dir.path().join("tower.rvt");
        model.write(&source_path).unwrap();
        let mut source = ModelDocument::open(&source_path, &OpenOptions::default()).unwrap();
        let out = dir.path().join("out");

        let settings = ExportSettings::new(&out)
            .with_set_names(["A/B", "A:B"])
            .with_recenter(false)
            .with_overwrite(overwrite);
        let summary = coordinator(Arc::new(ModelHost::new()), settings)
            .execute_export(&mut source)
            .await
            .unwrap();

        assert_eq!(summary.report("A/B").unwrap().status, SetStatus::Exported);
        let second = summary.report("A:B").unwrap();
        assert_eq!(second.status, SetStatus::Failed);
        assert_eq!(second.phase, Some(ExportPhase::Capture));
        assert!(second.message.as_deref().unwrap().contains("'A/B'"));
        assert_eq!(second.output_path, out.join("A_B.rvt"));
        assert!(out.join("A_B.rvt").exists());
    }
}
