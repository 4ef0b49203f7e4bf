//! Export command implementation
//!
//! This module implements the `export` command, which writes one artifact per
//! selection set of a model document.

use super::{
    audit_logger, exit_code_for, open_preferences, EXIT_CONFIG, EXIT_FATAL, EXIT_INTERRUPTED,
    EXIT_PARTIAL,
};
use crate::adapters::host::{DocumentHandle, OpenOptions};
use crate::adapters::model::ModelHost;
use crate::config::schema::{ArtifactMode, UnresolvedMemberPolicy};
use crate::config::{load_config_or_default, PreferencesStore, SetportConfig};
use crate::core::batch::CancellationSignal;
use crate::core::export::{ExportCoordinator, ExportSettings, ExportSummary, SetStatus};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Model document to export from
    pub model: PathBuf,

    /// Selection set to export (repeatable; default is every set)
    #[arg(short, long = "set", value_name = "NAME")]
    pub sets: Vec<String>,

    /// Output directory (default: config, then the last directory used)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Replace artifacts that already exist
    #[arg(long)]
    pub overwrite: bool,

    /// Skip recentering the artifacts
    #[arg(long)]
    pub no_recenter: bool,

    /// Detach artifacts from their central model
    #[arg(long)]
    pub detach: bool,

    /// How artifacts are produced
    #[arg(long, value_parser = ["copy", "save_as"])]
    pub mode: Option<String>,

    /// Report members that could not be carried into an artifact
    #[arg(long)]
    pub report_unresolved: bool,

    /// Plan the export without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the overwrite confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(model = %self.model.display(), "Starting export command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };
        self.apply_overrides(&mut config);

        let preferences = open_preferences(&config);
        if config.export.output_dir.trim().is_empty() {
            if let Some(dir) = default_output_dir(preferences.as_ref(), &self.model) {
                tracing::info!(output_dir = %dir.display(), "Using default output directory");
                config.export.output_dir = dir.to_string_lossy().into_owned();
            }
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let settings = match ExportSettings::from_config(&config.export) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{e}");
                return Ok(EXIT_CONFIG);
            }
        };

        if settings.dry_run {
            println!("🔍 DRY RUN MODE - No artifacts will be written");
            println!();
        }

        if settings.overwrite && !settings.dry_run && !self.yes && !confirm_overwrite(&settings)? {
            println!("Export cancelled.");
            return Ok(0);
        }

        let host = Arc::new(ModelHost::with_extension(settings.model_extension.clone()));
        let opened = DocumentHandle::open(host.as_ref(), &self.model, &OpenOptions::default());
        let mut source = match opened {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(error = %e, "Failed to open source document");
                eprintln!("Failed to open {}: {e}", self.model.display());
                return Ok(EXIT_FATAL);
            }
        };

        let output_dir = settings.output_dir.clone();
        let dry_run = settings.dry_run;
        let audit = audit_logger(&config, preferences.as_ref());
        let coordinator = ExportCoordinator::new(
            host.clone(),
            settings,
            CancellationSignal::new(shutdown_signal),
        )
        .with_audit_logger(audit);

        println!("🚀 Exporting selection sets from {}", self.model.display());
        println!();

        let result = coordinator.execute_export(source.document_mut()).await;
        if let Err(e) = source.close() {
            tracing::warn!(error = %e, "Failed to close source document");
        }

        let summary = match result {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if !dry_run {
            if let Some(prefs) = &preferences {
                if let Err(e) = prefs.remember_output_dir(&output_dir) {
                    tracing::warn!(error = %e, "Failed to remember output directory");
                }
            }
        }

        print_summary(&summary);
        Ok(exit_code(&summary))
    }

    fn apply_overrides(&self, config: &mut SetportConfig) {
        if !self.sets.is_empty() {
            tracing::info!(sets = ?self.sets, "Overriding selection sets from CLI");
            config.export.set_names = self.sets.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.export.output_dir = dir.to_string_lossy().into_owned();
        }
        if self.overwrite {
            config.export.overwrite = true;
        }
        if self.no_recenter {
            config.export.recenter_xy = false;
        }
        if self.detach {
            config.export.detach = true;
        }
        if let Some(mode) = &self.mode {
            config.export.artifact_mode = match mode.as_str() {
                "save_as" => ArtifactMode::SaveAs,
                _ => ArtifactMode::Copy,
            };
        }
        if self.report_unresolved {
            config.export.unresolved_members = UnresolvedMemberPolicy::Report;
        }
        if self.dry_run {
            config.export.dry_run = true;
        }
        if let Some(ext) = self.model.extension().and_then(|e| e.to_str()) {
            config.export.model_extension = ext.to_string();
        }
    }
}

/// Remembered output directory, else `<export root>/<model name>`
fn default_output_dir(preferences: Option<&PreferencesStore>, model: &Path) -> Option<PathBuf> {
    let preferences = preferences?;
    if let Some(dir) = preferences.last_output_dir() {
        return Some(dir);
    }
    let stem = model.file_stem()?.to_string_lossy().into_owned();
    Some(preferences.export_root_path().join(stem))
}

fn confirm_overwrite(settings: &ExportSettings) -> anyhow::Result<bool> {
    use std::io::{self, Write};

    println!("Existing artifacts in {} will be replaced.", settings.output_dir.display());
    print!("Proceed with export? [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    println!("  Sets: {}", summary.total_sets());
    println!("  Exported: {}", summary.succeeded());
    println!("  Failed: {}", summary.failed());
    println!("  Skipped: {}", summary.skipped());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    for report in &summary.reports {
        let marker = match report.status {
            SetStatus::Exported => "✅",
            SetStatus::Failed => "❌",
            SetStatus::Skipped => "⏭️ ",
        };
        println!("  {marker} {} -> {}", report.set_name, report.output_path.display());
        let details = report.describe();
        if !details.is_empty() {
            println!("     {details}");
        }
    }
    println!();
}

fn exit_code(summary: &ExportSummary) -> i32 {
    if summary.interrupted {
        println!("⚠️  Export interrupted. Sets not yet started were skipped.");
        tracing::info!("Export interrupted by user signal");
        EXIT_INTERRUPTED
    } else if summary.is_successful() {
        println!("✅ Export completed successfully!");
        0
    } else {
        println!("⚠️  Export completed with failures");
        EXIT_PARTIAL
    }
}
