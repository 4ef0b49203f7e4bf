//! Artifact verification
//!
//! Checksums of written artifacts, recorded in export summaries and audit
//! notes.

pub mod checksum;

pub use checksum::file_checksum;
