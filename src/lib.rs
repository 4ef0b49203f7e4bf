// Setport - Selection Set Export and Batch Processing
// Copyright (c) 2025 Setport Contributors
// Licensed under the MIT License

//! # Setport - Selection Set Export
//!
//! Setport turns the named selection sets of a model document into
//! standalone documents, one per set, and runs ordered process steps over
//! folders of documents.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Capturing** set membership as durable identity tokens that survive a
//!   file copy
//! - **Writing** one artifact per set, by file copy or host save-as
//! - **Recentering** each artifact so its wall footprint sits at the origin
//! - **Batch processing** documents through pluggable [`core::batch::ProcessStep`]s
//!
//! ## Architecture
//!
//! Setport follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export, identity, recenter, batch, verification)
//! - [`adapters`] - Host document abstraction and the file-backed model host
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration and preferences
//! - [`audit`] - CSV audit log
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use setport::adapters::host::{DocumentHandle, OpenOptions};
//! use setport::adapters::model::ModelHost;
//! use setport::config::ExportConfig;
//! use setport::core::batch::CancellationSignal;
//! use setport::core::export::{ExportCoordinator, ExportSettings};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = ExportConfig::default();
//!     config.output_dir = "/exports/tower".to_string();
//!     config.set_names = vec!["Kitchen".to_string(), "Bath".to_string()];
//!
//!     let host = Arc::new(ModelHost::new());
//!     let mut source =
//!         DocumentHandle::open(host.as_ref(), Path::new("tower.rvt"), &OpenOptions::default())?;
//!
//!     let coordinator = ExportCoordinator::new(
//!         host.clone(),
//!         ExportSettings::from_config(&config)?,
//!         CancellationSignal::never(),
//!     );
//!     let summary = coordinator.execute_export(source.document_mut()).await?;
//!     source.close()?;
//!
//!     println!("Exported {} of {} sets", summary.succeeded(), summary.total_sets());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::SetportError`]; per-set and per-file
//! failures are collected into reports instead of aborting the run.
//!
//! ## Logging
//!
//! Setport uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(set_name = "Kitchen", "Exporting selection set");
//! warn!(unresolved = 2, "Members did not resolve in the artifact");
//! ```

pub mod adapters;
pub mod audit;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
