//! File-backed reference host
//!
//! Model documents are JSON files holding elements and selection sets. The
//! host supports everything the export and batch flows need: durable ids,
//! transactions with rollback, locking, compacting save-as and detach.

pub mod document;
pub mod file;
pub mod host;

pub use document::ModelDocument;
pub use file::{ModelElement, ModelFile, MODEL_FORMAT_VERSION};
pub use host::{ModelHost, DEFAULT_MODEL_EXTENSION};
