//! Host integrations for Setport.
//!
//! This module provides the boundary between Setport and the CAD host:
//!
//! - [`host`] - Host document abstraction (trait-based)
//! - [`model`] - File-backed reference host used by the CLI and tests
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate the host engine and
//! enable testing without one. The core only ever talks to
//! [`host::HostApplication`] and [`host::HostDocument`] trait objects.
//!
//! ```rust,no_run
//! use setport::adapters::host::{DocumentHandle, OpenOptions};
//! use setport::adapters::model::ModelHost;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let host = ModelHost::new();
//! let handle = DocumentHandle::open(&host, Path::new("tower.rvt"), &OpenOptions::default())?;
//! println!("{}", handle.document().title());
//! handle.close()?;
//! # Ok(())
//! # }
//! ```

pub mod host;
pub mod model;
