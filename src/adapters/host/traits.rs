//! Host document abstraction traits
//!
//! This module defines the interface a CAD host must provide for Setport to
//! catalog selection sets, resolve durable identities, and move geometry.
//! Everything the core knows about a model goes through these two traits.

use crate::domain::errors::HostError;
use crate::domain::geometry::{BoundingBox3, Vector3};
use crate::domain::ids::{Category, ElementId, IdentityToken};
use crate::domain::selection::SelectionSet;
use std::path::Path;

/// Result alias for host operations
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Options applied when opening a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenOptions {
    /// Detach the opened copy from its central model
    pub detach_from_central: bool,
}

/// Options applied when saving a document in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Compact the file while saving
    pub compact: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self { compact: true }
    }
}

/// Options applied when saving a copy of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveAsOptions {
    /// Compact the written copy
    pub compact: bool,

    /// Embed a preview image in the written copy
    pub preview: bool,

    /// Replace an existing file at the target path
    pub overwrite: bool,
}

impl Default for SaveAsOptions {
    fn default() -> Self {
        Self {
            compact: true,
            preview: false,
            overwrite: false,
        }
    }
}

/// Host application capable of opening documents
pub trait HostApplication: Send + Sync {
    /// Open the document stored at `path`
    ///
    /// # Errors
    ///
    /// Returns [`HostError::OpenFailed`] if the file is missing or not a
    /// valid model.
    fn open_document(&self, path: &Path, options: &OpenOptions)
        -> HostResult<Box<dyn HostDocument>>;

    /// File extension (without the dot) of documents this host produces
    fn document_extension(&self) -> &str;
}

/// One open host document
///
/// Element references handed out by a document are only valid for that
/// document instance. Mutating operations (`set_locked`, `move_elements`)
/// must run inside a transaction.
pub trait HostDocument: Send {
    /// Document title
    fn title(&self) -> &str;

    /// Path the document was opened from, if it has been saved
    fn path(&self) -> Option<&Path>;

    /// Whether the document has unsaved changes
    fn is_modified(&self) -> bool;

    /// All selection sets defined in the document, in host order
    fn selection_sets(&self) -> HostResult<Vec<SelectionSet>>;

    /// Durable identity of an element
    ///
    /// Returns `Ok(None)` for elements without a durable identity and
    /// [`HostError::ElementNotFound`] for elements that no longer exist.
    fn durable_id(&self, id: ElementId) -> HostResult<Option<IdentityToken>>;

    /// Local reference for a durable identity, if the element exists here
    fn element_by_durable_id(&self, token: &IdentityToken) -> HostResult<Option<ElementId>>;

    /// Category of an element, if it has one
    fn category(&self, id: ElementId) -> HostResult<Option<Category>>;

    /// Geometric bounds of an element, if it has computable geometry
    fn bounding_box(&self, id: ElementId) -> HostResult<Option<BoundingBox3>>;

    /// Whether the element is locked against modification
    fn is_locked(&self, id: ElementId) -> HostResult<bool>;

    /// Lock or unlock an element
    fn set_locked(&mut self, id: ElementId, locked: bool) -> HostResult<()>;

    /// Rigidly translate the given elements
    fn move_elements(&mut self, ids: &[ElementId], delta: Vector3) -> HostResult<()>;

    /// Begin a transaction group that can contain several transactions
    fn start_transaction_group(&mut self, name: &str) -> HostResult<()>;

    /// Merge the open transaction group into a single undoable change
    fn assimilate_transaction_group(&mut self) -> HostResult<()>;

    /// Roll back everything committed inside the open transaction group
    fn rollback_transaction_group(&mut self) -> HostResult<()>;

    /// Begin a transaction
    fn start_transaction(&mut self, name: &str) -> HostResult<()>;

    /// Commit the open transaction
    fn commit_transaction(&mut self) -> HostResult<()>;

    /// Roll back the open transaction
    fn rollback_transaction(&mut self) -> HostResult<()>;

    /// Save the document in place
    fn save(&mut self, options: &SaveOptions) -> HostResult<()>;

    /// Write a copy of the document to `path`
    fn save_as(&mut self, path: &Path, options: &SaveAsOptions) -> HostResult<()>;

    /// Close the document, discarding unsaved changes
    fn close(&mut self) -> HostResult<()>;
}
