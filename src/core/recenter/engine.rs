//! Horizontal recentering of a selection set
//!
//! The translation is derived from the footprint of the anchor category only,
//! but applied to every target element so the whole set moves together.

use super::bounds::union_bounds;
use crate::adapters::host::{with_transaction, with_transaction_group, HostDocument};
use crate::domain::errors::HostError;
use crate::domain::geometry::RecenterTranslation;
use crate::domain::ids::{Category, ElementId};
use crate::domain::{Result, SetportError};
use std::collections::HashSet;

/// Name of the undo group that wraps a recenter
pub const RECENTER_GROUP_NAME: &str = "Center To Origin";

/// Name of the transaction that moves the elements
pub const RECENTER_TRANSACTION_NAME: &str = "Move selection set";

/// What a recenter call did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecenterOutcome {
    /// Every target element was moved by `translation`
    Moved {
        translation: RecenterTranslation,
        element_count: usize,
    },

    /// No target elements were given
    EmptySelection,

    /// No anchor element contributed geometry
    NoGeometry,

    /// The footprint center was not finite
    NonFiniteCenter,
}

impl RecenterOutcome {
    pub fn translation(&self) -> Option<RecenterTranslation> {
        match self {
            RecenterOutcome::Moved { translation, .. } => Some(*translation),
            _ => None,
        }
    }

    pub fn is_moved(&self) -> bool {
        matches!(self, RecenterOutcome::Moved { .. })
    }
}

/// Centers element sets at the origin in the horizontal plane
#[derive(Debug, Clone)]
pub struct RecenterEngine {
    anchor: Category,
}

impl RecenterEngine {
    /// Creates an engine anchored on `anchor` category elements
    pub fn new(anchor: Category) -> Self {
        Self { anchor }
    }

    pub fn anchor(&self) -> &Category {
        &self.anchor
    }

    /// Move `ids` so the anchor footprint is centered at the origin
    ///
    /// Lock flags are preserved. Nothing is touched when there is no anchor
    /// geometry. Any failure while moving rolls back every change and is
    /// returned as [`SetportError::Transform`].
    pub fn center_to_origin(
        &self,
        doc: &mut dyn HostDocument,
        ids: &[ElementId],
    ) -> Result<RecenterOutcome> {
        let mut seen = HashSet::with_capacity(ids.len());
        let targets: Vec<ElementId> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
        if targets.is_empty() {
            return Ok(RecenterOutcome::EmptySelection);
        }

        let union = union_bounds(doc, &targets, &self.anchor);
        if union.is_empty() {
            tracing::info!(
                document = %doc.title(),
                anchor = %self.anchor,
                "No anchor geometry found, skipping recenter"
            );
            return Ok(RecenterOutcome::NoGeometry);
        }

        let Some(translation) = RecenterTranslation::from_bounds(&union) else {
            tracing::warn!(
                document = %doc.title(),
                "Footprint center is not finite, skipping recenter"
            );
            return Ok(RecenterOutcome::NonFiniteCenter);
        };

        let locks = targets
            .iter()
            .map(|&id| doc.is_locked(id).map(|locked| (id, locked)))
            .collect::<std::result::Result<Vec<_>, HostError>>()
            .map_err(|e| SetportError::Transform(format!("Failed to read lock state: {e}")))?;

        with_transaction_group(doc, RECENTER_GROUP_NAME, |doc| {
            with_transaction(doc, RECENTER_TRANSACTION_NAME, |doc| {
                move_preserving_locks(doc, &targets, &locks, translation)
            })
        })
        .map_err(|e: HostError| {
            tracing::error!(error = %e, "Recenter failed and was rolled back");
            SetportError::Transform(format!("Recenter rolled back: {e}"))
        })?;

        tracing::info!(
            document = %doc.title(),
            translation = %translation,
            elements = targets.len(),
            contributors = union.contributors,
            "Recentered selection"
        );

        Ok(RecenterOutcome::Moved {
            translation,
            element_count: targets.len(),
        })
    }
}

fn move_preserving_locks(
    doc: &mut dyn HostDocument,
    targets: &[ElementId],
    locks: &[(ElementId, bool)],
    translation: RecenterTranslation,
) -> std::result::Result<(), HostError> {
    for &(id, locked) in locks {
        if locked {
            doc.set_locked(id, false)?;
        }
    }
    doc.move_elements(targets, translation.delta)?;
    for &(id, locked) in locks {
        if locked {
            doc.set_locked(id, true)?;
        }
    }
    Ok(())
}
