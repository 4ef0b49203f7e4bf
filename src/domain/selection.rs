//! Selection set snapshot

use crate::domain::ids::ElementId;
use serde::{Deserialize, Serialize};

/// A named, persistent grouping of element references inside one document
///
/// This is a read-only snapshot taken when the catalog is read; its members
/// are only meaningful inside the document they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    /// Set name, unique within a document (case-insensitive)
    pub name: String,

    /// Member element references in host order
    pub members: Vec<ElementId>,
}

impl SelectionSet {
    pub fn new(name: impl Into<String>, members: Vec<ElementId>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
