//! Checksum calculation for artifact verification
//!
//! Every artifact written by an export is hashed once it is final, so the
//! summary and the audit log can identify exactly which bytes were produced.

use crate::domain::Result;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Calculate SHA-256 checksum of a file, streaming its content
///
/// Returns the hex-encoded digest (64 characters).
pub fn file_checksum(path: &Path) -> Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
