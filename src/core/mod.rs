//! Core business logic for Setport.
//!
//! # Modules
//!
//! - [`catalog`] - Selection set enumeration
//! - [`identity`] - Durable identity capture and resolution across documents
//! - [`recenter`] - Footprint aggregation and lock-preserving recentering
//! - [`export`] - Per-set export orchestration, artifact writing and reporting
//! - [`batch`] - Generic process-step pipeline over many documents
//! - [`verification`] - Artifact checksums
//!
//! # Export Workflow
//!
//! 1. **Catalog**: Read the selection sets of the source document
//! 2. **Capture**: Record durable identity tokens for every selected set
//! 3. **Write**: Produce one artifact per set (conflicts never overwrite)
//! 4. **Recenter** (optional): Re-open the artifact, resolve tokens and move
//!    the set so its wall footprint is centered at the origin
//! 5. **Report**: Checksum, audit row and export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use setport::adapters::host::OpenOptions;
//! use setport::adapters::model::{ModelDocument, ModelHost};
//! use setport::core::batch::CancellationSignal;
//! use setport::core::export::{ExportCoordinator, ExportSettings};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = ModelDocument::open(Path::new("tower.rvt"), &OpenOptions::default())?;
//! let settings = ExportSettings::new("exports").with_set_names(["Kitchen", "Bath"]);
//!
//! let coordinator =
//!     ExportCoordinator::new(Arc::new(ModelHost::new()), settings, CancellationSignal::never());
//! let summary = coordinator.execute_export(&mut source).await?;
//!
//! println!("Exported: {}", summary.succeeded());
//! println!("Failed: {}", summary.failed());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod catalog;
pub mod export;
pub mod identity;
pub mod recenter;
pub mod verification;
