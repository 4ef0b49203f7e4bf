//! In-process model document

use super::file::{ModelElement, ModelFile};
use crate::adapters::host::traits::{
    HostDocument, HostResult, OpenOptions, SaveAsOptions, SaveOptions,
};
use crate::domain::errors::HostError;
use crate::domain::geometry::{BoundingBox3, Vector3};
use crate::domain::ids::{Category, ElementId, IdentityToken};
use crate::domain::selection::SelectionSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Element state captured when a transaction or group starts
#[derive(Debug)]
struct Snapshot {
    name: String,
    elements: Vec<ModelElement>,
    modified: bool,
}

/// A model document held in memory
///
/// Mutations require an active transaction. Transactions may be nested inside
/// a transaction group but not inside each other.
#[derive(Debug)]
pub struct ModelDocument {
    model: ModelFile,
    path: Option<PathBuf>,
    modified: bool,
    closed: bool,
    group: Option<Snapshot>,
    transaction: Option<Snapshot>,
    open_documents: Option<Arc<AtomicUsize>>,
}

impl ModelDocument {
    /// Wraps a model that has never been saved
    pub fn from_model(model: ModelFile) -> Self {
        Self {
            model,
            path: None,
            modified: false,
            closed: false,
            group: None,
            transaction: None,
            open_documents: None,
        }
    }

    /// Opens the model stored at `path`
    pub fn open(path: &Path, options: &OpenOptions) -> HostResult<Self> {
        let mut model = ModelFile::read(path)?;
        // A detached copy has no central and must be saved to persist that
        let modified = options.detach_from_central;
        if modified {
            model.central_path = None;
        }

        Ok(Self {
            model,
            path: Some(path.to_path_buf()),
            modified,
            closed: false,
            group: None,
            transaction: None,
            open_documents: None,
        })
    }

    /// Registers this document with a host's open-document counter
    pub(crate) fn track_with(mut self, counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        self.open_documents = Some(counter);
        self
    }

    /// Current model content
    pub fn model(&self) -> &ModelFile {
        &self.model
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether the document is still attached to a central model
    pub fn is_workshared(&self) -> bool {
        self.model.central_path.is_some()
    }

    fn ensure_open(&self) -> HostResult<()> {
        if self.closed {
            return Err(HostError::DocumentClosed);
        }
        Ok(())
    }

    fn ensure_transaction(&self) -> HostResult<()> {
        self.ensure_open()?;
        if self.transaction.is_none() {
            return Err(HostError::NoActiveTransaction);
        }
        Ok(())
    }

    fn element(&self, id: ElementId) -> HostResult<&ModelElement> {
        self.ensure_open()?;
        self.model
            .element(id)
            .ok_or(HostError::ElementNotFound(id))
    }

    fn snapshot(&self, name: &str) -> Snapshot {
        Snapshot {
            name: name.to_string(),
            elements: self.model.elements.clone(),
            modified: self.modified,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        tracing::debug!(
            scope = %snapshot.name,
            title = %self.model.title,
            "Restoring element state"
        );
        self.model.elements = snapshot.elements;
        self.modified = snapshot.modified;
    }
}

impl HostDocument for ModelDocument {
    fn title(&self) -> &str {
        &self.model.title
    }

    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn is_modified(&self) -> bool {
        self.modified
    }

    fn selection_sets(&self) -> HostResult<Vec<SelectionSet>> {
        self.ensure_open()?;
        Ok(self.model.selection_sets.clone())
    }

    fn durable_id(&self, id: ElementId) -> HostResult<Option<IdentityToken>> {
        Ok(self.element(id)?.unique_id.clone())
    }

    fn element_by_durable_id(&self, token: &IdentityToken) -> HostResult<Option<ElementId>> {
        self.ensure_open()?;
        // Later elements shadow earlier ones claiming the same durable id
        Ok(self
            .model
            .elements
            .iter()
            .rev()
            .find(|e| e.unique_id.as_ref() == Some(token))
            .map(|e| e.id))
    }

    fn category(&self, id: ElementId) -> HostResult<Option<Category>> {
        Ok(self.element(id)?.category.clone())
    }

    fn bounding_box(&self, id: ElementId) -> HostResult<Option<BoundingBox3>> {
        let element = self.element(id)?;
        if element.geometry_corrupt {
            return Err(HostError::GeometryUnavailable(id));
        }
        Ok(element.bounds)
    }

    fn is_locked(&self, id: ElementId) -> HostResult<bool> {
        Ok(self.element(id)?.locked)
    }

    fn set_locked(&mut self, id: ElementId, locked: bool) -> HostResult<()> {
        self.ensure_transaction()?;
        let element = self
            .model
            .element_mut(id)
            .ok_or(HostError::ElementNotFound(id))?;
        if element.locked != locked {
            element.locked = locked;
            self.modified = true;
        }
        Ok(())
    }

    fn move_elements(&mut self, ids: &[ElementId], delta: Vector3) -> HostResult<()> {
        self.ensure_transaction()?;
        if !delta.is_finite() {
            return Err(HostError::TransactionFailed(format!(
                "non-finite translation {delta:?}"
            )));
        }

        for &id in ids {
            let element = self
                .model
                .element_mut(id)
                .ok_or(HostError::ElementNotFound(id))?;
            if element.locked {
                return Err(HostError::ElementLocked(id));
            }
            if element.immovable {
                return Err(HostError::Immovable(id));
            }
            if let Some(bounds) = element.bounds {
                element.bounds = Some(bounds.translated(&delta));
            }
            self.modified = true;
        }
        Ok(())
    }

    fn start_transaction_group(&mut self, name: &str) -> HostResult<()> {
        self.ensure_open()?;
        if let Some(active) = &self.group {
            return Err(HostError::TransactionFailed(format!(
                "transaction group '{}' is already active",
                active.name
            )));
        }
        if self.transaction.is_some() {
            return Err(HostError::TransactionFailed(
                "cannot start a group inside a transaction".to_string(),
            ));
        }
        self.group = Some(self.snapshot(name));
        Ok(())
    }

    fn assimilate_transaction_group(&mut self) -> HostResult<()> {
        self.ensure_open()?;
        if self.transaction.is_some() {
            return Err(HostError::TransactionFailed(
                "cannot assimilate a group with an open transaction".to_string(),
            ));
        }
        self.group
            .take()
            .map(|_| ())
            .ok_or_else(|| HostError::TransactionFailed("no active transaction group".to_string()))
    }

    fn rollback_transaction_group(&mut self) -> HostResult<()> {
        self.ensure_open()?;
        let group = self
            .group
            .take()
            .ok_or_else(|| {
                HostError::TransactionFailed("no active transaction group".to_string())
            })?;
        self.transaction = None;
        self.restore(group);
        Ok(())
    }

    fn start_transaction(&mut self, name: &str) -> HostResult<()> {
        self.ensure_open()?;
        if let Some(active) = &self.transaction {
            return Err(HostError::TransactionFailed(format!(
                "transaction '{}' is already active",
                active.name
            )));
        }
        self.transaction = Some(self.snapshot(name));
        Ok(())
    }

    fn commit_transaction(&mut self) -> HostResult<()> {
        self.ensure_open()?;
        self.transaction
            .take()
            .map(|_| ())
            .ok_or(HostError::NoActiveTransaction)
    }

    fn rollback_transaction(&mut self) -> HostResult<()> {
        self.ensure_open()?;
        let transaction = self
            .transaction
            .take()
            .ok_or(HostError::NoActiveTransaction)?;
        self.restore(transaction);
        Ok(())
    }

    fn save(&mut self, _options: &SaveOptions) -> HostResult<()> {
        self.ensure_open()?;
        if self.transaction.is_some() || self.group.is_some() {
            return Err(HostError::SaveFailed(
                "cannot save while a transaction is active".to_string(),
            ));
        }
        let path = self.path.clone().ok_or_else(|| {
            HostError::SaveFailed(format!("'{}' has never been saved", self.model.title))
        })?;
        self.model.write(&path)?;
        self.modified = false;
        Ok(())
    }

    fn save_as(&mut self, path: &Path, options: &SaveAsOptions) -> HostResult<()> {
        self.ensure_open()?;
        if self.transaction.is_some() || self.group.is_some() {
            return Err(HostError::SaveFailed(
                "cannot save while a transaction is active".to_string(),
            ));
        }
        if path.exists() && !options.overwrite {
            return Err(HostError::SaveFailed(format!(
                "{} already exists",
                path.display()
            )));
        }

        let mut copy = if options.compact {
            self.model.compacted()
        } else {
            self.model.clone()
        };
        copy.preview = options.preview;
        copy.write(path)
    }

    fn close(&mut self) -> HostResult<()> {
        self.ensure_open()?;
        self.closed = true;
        self.group = None;
        self.transaction = None;
        if let Some(counter) = &self.open_documents {
            counter.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
