//! Selection set export
//!
//! This module provides the export workflow for Setport, including:
//! - Export settings and per-set jobs
//! - Artifact writing with conflict detection and backup cleanup
//! - Export coordination and orchestration
//! - Summary and reporting

pub mod cleanup;
pub mod coordinator;
pub mod settings;
pub mod summary;
pub mod writer;

pub use cleanup::{delete_backup_files, is_backup_file};
pub use coordinator::ExportCoordinator;
pub use settings::{artifact_path, ExportJob, ExportSettings};
pub use summary::{ExportPhase, ExportSummary, SetReport, SetStatus};
pub use writer::{ArtifactWriter, WrittenArtifact};
