//! Domain models and types for Setport.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ElementId`], [`IdentityToken`], [`Category`])
//! - **Geometry values** ([`BoundingBox3`], [`BoundingBox2D`], [`RecenterTranslation`])
//! - **Selection set snapshots** ([`SelectionSet`])
//! - **Error types** ([`SetportError`], [`HostError`], [`FailureKind`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Host-local references and durable identities are distinct types, so a
//! reference from one document cannot be used where a cross-document token is
//! expected:
//!
//! ```rust
//! use setport::domain::{ElementId, IdentityToken};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let local = ElementId::new(1024);
//! let durable = IdentityToken::new("5e1f0c4a-0000-0400")?;
//!
//! // This won't compile - a local reference is not a durable identity
//! // let wrong: IdentityToken = local;
//! # let _ = (local, durable);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod filename;
pub mod geometry;
pub mod ids;
pub mod result;
pub mod selection;

// Re-export commonly used types for convenience
pub use errors::{FailureKind, HostError, SetportError};
pub use geometry::{BoundingBox2D, BoundingBox3, Point3, RecenterTranslation, Vector3};
pub use ids::{Category, ElementId, IdentityToken};
pub use result::Result;
pub use selection::SelectionSet;
