//! Batch command implementation
//!
//! Runs the configured process steps over every model document in a folder.

use super::{
    audit_logger, open_preferences, EXIT_CONFIG, EXIT_FATAL, EXIT_INTERRUPTED, EXIT_PARTIAL,
};
use crate::adapters::model::ModelHost;
use crate::config::{load_config_or_default, SetportConfig};
use crate::core::batch::{
    resolve_steps, BatchOptions, BatchPipeline, BatchReport, CancellationSignal,
};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the batch command
#[derive(Args, Debug, Default)]
pub struct BatchArgs {
    /// Documents to process (default: every document in the input folder)
    pub files: Vec<PathBuf>,

    /// Folder whose top-level documents are processed
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Step to run (repeatable, in order; see `list-steps`)
    #[arg(short, long = "step", value_name = "ID")]
    pub steps: Vec<String>,

    /// Document extension to pick up from the input folder
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Open documents detached from their central model
    #[arg(long)]
    pub detach: bool,
}

impl BatchArgs {
    /// Execute the batch command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting batch command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };
        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let steps = match resolve_steps(&config.batch.steps) {
            Ok(steps) => steps,
            Err(e) => {
                eprintln!("{e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let files = if self.files.is_empty() {
            if config.batch.input_dir.trim().is_empty() {
                eprintln!("No documents given and batch.input_dir is not set");
                return Ok(EXIT_CONFIG);
            }
            let dir = PathBuf::from(config.batch.input_dir.trim());
            match BatchPipeline::discover_files(&dir, &config.batch.extension) {
                Ok(files) => files,
                Err(e) => {
                    eprintln!("{e}");
                    return Ok(EXIT_FATAL);
                }
            }
        } else {
            self.files.clone()
        };

        if files.is_empty() {
            println!("No documents to process.");
            return Ok(0);
        }

        let options = BatchOptions::from(&config.batch);
        let preferences = open_preferences(&config);
        let pipeline = BatchPipeline::new(
            Arc::new(ModelHost::with_extension(options.extension.clone())),
            steps,
        )
        .with_options(options)
        .with_audit_logger(audit_logger(&config, preferences.as_ref()));

        println!(
            "🚀 Processing {} document(s) with steps: {}",
            files.len(),
            config.batch.steps.join(", ")
        );
        println!();

        let report = pipeline
            .run(&files, &CancellationSignal::new(shutdown_signal))
            .await;

        print_report(&report);
        Ok(exit_code(&report))
    }

    fn apply_overrides(&self, config: &mut SetportConfig) {
        if let Some(dir) = &self.input_dir {
            config.batch.input_dir = dir.to_string_lossy().into_owned();
        }
        if !self.steps.is_empty() {
            config.batch.steps = self.steps.clone();
        }
        if let Some(ext) = &self.extension {
            config.batch.extension = ext.trim_start_matches('.').to_string();
        }
        if self.detach {
            config.batch.detach = true;
        }
    }
}

fn print_report(report: &BatchReport) {
    println!();
    println!("📊 Batch Summary:");
    println!("  Documents: {}", report.total_files);
    println!("  Succeeded: {}", report.succeeded());
    println!("  Failed: {}", report.failed());
    println!("  Not started: {}", report.not_started());
    println!("  Duration: {:.2}s", report.duration.as_secs_f64());
    println!();

    for item in &report.items {
        let marker = if item.is_successful() { "✅" } else { "❌" };
        println!("  {marker} {}", item.file_path.display());
        if let Some(error) = &item.error {
            println!("     {error}");
        }
        for result in &item.results {
            println!("     [{}] {}: {}", result.status, result.step_id, result.message);
        }
    }
    println!();
}

fn exit_code(report: &BatchReport) -> i32 {
    if report.interrupted {
        println!("⚠️  Batch interrupted.");
        EXIT_INTERRUPTED
    } else if report.is_successful() {
        println!("✅ Batch completed successfully!");
        0
    } else {
        println!("⚠️  Batch completed with failures");
        EXIT_PARTIAL
    }
}
