//! Cross-document identity resolution
//!
//! Element references are only valid inside the document that produced them.
//! Anything that must survive a copy is captured as [`IdentityToken`]s first
//! and resolved again inside the target document.
//!
//! [`IdentityToken`]: crate::domain::IdentityToken

pub mod resolver;

pub use resolver::{capture, capture_ordered, resolve, resolve_ordered, CaptureOutcome};
