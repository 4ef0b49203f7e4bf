//! Domain error types
//!
//! This module defines the error hierarchy for Setport. Host-interface failures
//! are reported as [`HostError`] and wrapped by [`SetportError`], which is the
//! error type returned throughout the library.

use crate::domain::ids::ElementId;
use std::path::PathBuf;
use thiserror::Error;

/// Main Setport error type
///
/// Every variant maps onto one [`FailureKind`], which is what batch summaries
/// and audit rows report.
#[derive(Debug, Error)]
pub enum SetportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Errors raised by the host document interface
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Target artifact already exists and overwriting is disallowed
    #[error("Output already exists: {}", .0.display())]
    Conflict(PathBuf),

    /// A selection set or file named by the caller does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A transactional geometry mutation failed and was rolled back
    #[error("Transform failed: {0}")]
    Transform(String),

    /// Cooperative cancellation was observed
    #[error("Canceled by user")]
    Canceled,

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl SetportError {
    /// Classify the error for reporting
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            SetportError::Configuration(_) | SetportError::Validation(_) => {
                FailureKind::Configuration
            }
            SetportError::Conflict(_) => FailureKind::Conflict,
            SetportError::NotFound(_) => FailureKind::NotFound,
            SetportError::Transform(_) => FailureKind::TransformFailure,
            SetportError::Canceled => FailureKind::CanceledByUser,
            SetportError::Io(_) | SetportError::Serialization(_) => FailureKind::IoFailure,
            SetportError::Host(host) => host.failure_kind(),
            SetportError::Other(_) => FailureKind::Unknown,
        }
    }

    /// Whether this error represents cooperative cancellation rather than a failure
    pub fn is_canceled(&self) -> bool {
        matches!(self, SetportError::Canceled)
    }
}

/// Host document interface errors
///
/// Errors reported by a [`crate::adapters::host::HostDocument`] or
/// [`crate::adapters::host::HostApplication`] implementation.
#[derive(Debug, Error)]
pub enum HostError {
    /// The document could not be opened
    #[error("Failed to open document {}: {reason}", .path.display())]
    OpenFailed { path: PathBuf, reason: String },

    /// The document could not be saved
    #[error("Failed to save document: {0}")]
    SaveFailed(String),

    /// The document was already closed
    #[error("Document is closed")]
    DocumentClosed,

    /// The element does not exist in this document
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    /// The element's geometry could not be evaluated
    #[error("Geometry unavailable for element {0}")]
    GeometryUnavailable(ElementId),

    /// The element is locked and cannot be modified
    #[error("Element {0} is locked")]
    ElementLocked(ElementId),

    /// The host refused to move the element
    #[error("Element {0} cannot be moved")]
    Immovable(ElementId),

    /// A modification was attempted outside of a transaction
    #[error("Modification requires an active transaction")]
    NoActiveTransaction,

    /// Transaction bookkeeping failed (nesting, commit, rollback)
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// The document content is not a valid model
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Underlying file system failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl HostError {
    /// Classify the host error for reporting
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            HostError::OpenFailed { .. }
            | HostError::SaveFailed(_)
            | HostError::DocumentClosed
            | HostError::InvalidModel(_)
            | HostError::Io(_) => FailureKind::IoFailure,
            HostError::GeometryUnavailable(_) => FailureKind::GeometryGap,
            HostError::ElementLocked(_)
            | HostError::Immovable(_)
            | HostError::NoActiveTransaction
            | HostError::TransactionFailed(_) => FailureKind::TransformFailure,
            HostError::ElementNotFound(_) => FailureKind::NotFound,
        }
    }
}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        HostError::Io(err.to_string())
    }
}

/// Failure taxonomy used by summaries and audit rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Target artifact already exists and overwrite is disallowed
    Conflict,
    /// No members resolved in the artifact; recentering skipped
    ResolutionGap,
    /// No contributing geometry; recentering is a no-op
    GeometryGap,
    /// A transactional mutation failed and was rolled back
    TransformFailure,
    /// Cooperative cancellation observed at an item boundary
    CanceledByUser,
    /// File copy/open/save failure
    IoFailure,
    /// Malformed configuration
    Configuration,
    /// Named set or file does not exist
    NotFound,
    /// Unknown error
    Unknown,
}

impl FailureKind {
    /// Whether this kind is an informational outcome rather than an error
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            FailureKind::ResolutionGap | FailureKind::GeometryGap | FailureKind::CanceledByUser
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for SetportError {
    fn from(err: std::io::Error) -> Self {
        SetportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SetportError {
    fn from(err: serde_json::Error) -> Self {
        SetportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SetportError {
    fn from(err: toml::de::Error) -> Self {
        SetportError::Configuration(format!("TOML parse error: {err}"))
    }
}
