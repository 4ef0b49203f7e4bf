//! Selection set catalog
//!
//! Sets are re-read from the document on every call; nothing is cached
//! across documents.

use crate::adapters::host::HostDocument;
use crate::domain::selection::SelectionSet;
use crate::domain::Result;

/// All selection sets defined in `doc`, sorted by name
///
/// Names are compared ordinally (byte order, case-sensitive). A document
/// without selection sets yields an empty list.
pub fn list_selection_sets(doc: &dyn HostDocument) -> Result<Vec<SelectionSet>> {
    let mut sets = doc.selection_sets()?;
    sets.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(
        document = %doc.title(),
        count = sets.len(),
        "Read selection set catalog"
    );
    Ok(sets)
}

/// Find a set by name, ignoring case
pub fn find_selection_set<'a>(sets: &'a [SelectionSet], name: &str) -> Option<&'a SelectionSet> {
    sets.iter().find(|s| s.is_named(name))
}
