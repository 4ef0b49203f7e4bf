//! On-disk model document format
//!
//! A model document is a pretty-printed JSON file. The schema is deliberately
//! small: elements with optional durable ids, categories, lock flags and 3D
//! bounds, plus the named selection sets that group them.

use crate::domain::errors::HostError;
use crate::domain::geometry::BoundingBox3;
use crate::domain::ids::{Category, ElementId, IdentityToken};
use crate::domain::selection::SelectionSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Current model format version
pub const MODEL_FORMAT_VERSION: u32 = 1;

fn default_format_version() -> u32 {
    MODEL_FORMAT_VERSION
}

/// One element stored in a model document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelElement {
    /// Local element id, unique within the file
    pub id: ElementId,

    /// Durable identity, preserved across copies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<IdentityToken>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(default)]
    pub locked: bool,

    /// Axis-aligned bounds; `None` for elements without geometry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox3>,

    /// Bound extraction fails for this element
    #[serde(default)]
    pub geometry_corrupt: bool,

    /// The host refuses to move this element
    #[serde(default)]
    pub immovable: bool,
}

impl ModelElement {
    /// Creates an unlocked element with a fresh durable id and no geometry
    pub fn new(id: ElementId, category: impl Into<Category>) -> Self {
        Self {
            id,
            unique_id: Some(IdentityToken::generate()),
            category: Some(category.into()),
            locked: false,
            bounds: None,
            geometry_corrupt: false,
            immovable: false,
        }
    }

    pub fn with_bounds(mut self, bounds: BoundingBox3) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_unique_id(mut self, unique_id: Option<IdentityToken>) -> Self {
        self.unique_id = unique_id;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn immovable(mut self, immovable: bool) -> Self {
        self.immovable = immovable;
        self
    }

    pub fn geometry_corrupt(mut self, corrupt: bool) -> Self {
        self.geometry_corrupt = corrupt;
        self
    }
}

/// Serialized model document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    #[serde(default = "default_format_version")]
    pub format_version: u32,

    pub title: String,

    /// Central model this file is a local copy of, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub central_path: Option<PathBuf>,

    /// Whether a preview image is embedded
    #[serde(default)]
    pub preview: bool,

    /// Next local id handed out by [`ModelFile::allocate_id`]
    #[serde(default)]
    pub next_element_id: i64,

    #[serde(default)]
    pub elements: Vec<ModelElement>,

    #[serde(default)]
    pub selection_sets: Vec<SelectionSet>,
}

impl ModelFile {
    /// Creates an empty model
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            format_version: MODEL_FORMAT_VERSION,
            title: title.into(),
            central_path: None,
            preview: false,
            next_element_id: 1,
            elements: Vec::new(),
            selection_sets: Vec::new(),
        }
    }

    /// Hands out the next unused local id
    pub fn allocate_id(&mut self) -> ElementId {
        let highest = self
            .elements
            .iter()
            .map(|e| e.id.value())
            .max()
            .unwrap_or(0);
        let next = self.next_element_id.max(highest + 1);
        self.next_element_id = next + 1;
        ElementId::new(next)
    }

    /// Adds an element built from a freshly allocated id
    pub fn add_element<F>(&mut self, build: F) -> ElementId
    where
        F: FnOnce(ElementId) -> ModelElement,
    {
        let id = self.allocate_id();
        let mut element = build(id);
        element.id = id;
        self.elements.push(element);
        id
    }

    /// Defines (or replaces) a selection set
    pub fn add_selection_set(&mut self, name: impl Into<String>, members: Vec<ElementId>) {
        let set = SelectionSet::new(name, members);
        self.selection_sets.retain(|s| !s.is_named(&set.name));
        self.selection_sets.push(set);
    }

    pub fn element(&self, id: ElementId) -> Option<&ModelElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut ModelElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Returns a copy with every local id renumbered
    ///
    /// Durable ids are preserved; selection set members are remapped and
    /// references to missing elements are dropped.
    pub fn compacted(&self) -> ModelFile {
        let base = self
            .elements
            .iter()
            .map(|e| e.id.value())
            .max()
            .unwrap_or(0)
            .max(self.next_element_id)
            + 1;

        let mut mapping = HashMap::with_capacity(self.elements.len());
        let mut copy = self.clone();
        for (offset, element) in copy.elements.iter_mut().enumerate() {
            let new_id = ElementId::new(base + offset as i64);
            mapping.insert(element.id, new_id);
            element.id = new_id;
        }
        for set in &mut copy.selection_sets {
            set.members = set
                .members
                .iter()
                .filter_map(|m| mapping.get(m).copied())
                .collect();
        }
        copy.next_element_id = base + copy.elements.len() as i64;
        copy
    }

    /// Reads a model from disk
    pub fn read(path: &Path) -> Result<Self, HostError> {
        let content = std::fs::read_to_string(path).map_err(|e| HostError::OpenFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let model: ModelFile =
            serde_json::from_str(&content).map_err(|e| HostError::OpenFailed {
                path: path.to_path_buf(),
                reason: format!("not a valid model document: {e}"),
            })?;
        if model.format_version > MODEL_FORMAT_VERSION {
            return Err(HostError::OpenFailed {
                path: path.to_path_buf(),
                reason: format!("unsupported format version {}", model.format_version),
            });
        }
        Ok(model)
    }

    /// Writes the model to disk, replacing any existing file
    pub fn write(&self, path: &Path) -> Result<(), HostError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| HostError::SaveFailed(format!("{}: {e}", path.display())))?;
        std::fs::write(path, content)
            .map_err(|e| HostError::SaveFailed(format!("{}: {e}", path.display())))?;
        Ok(())
    }
}
