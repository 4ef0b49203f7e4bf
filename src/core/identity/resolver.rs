//! Capture and resolve durable identities
//!
//! Both directions are silent per item: an element that has no durable id
//! (or no longer exists) is left out of the capture, and a token that does
//! not resolve in the target document is left out of the resolution. Callers
//! observe a smaller result, never an error.

use crate::adapters::host::HostDocument;
use crate::domain::ids::{ElementId, IdentityToken};
use std::collections::{HashMap, HashSet};

/// Tokens captured for one ordered member list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureOutcome {
    /// Distinct tokens in member order
    pub tokens: Vec<IdentityToken>,

    /// Members that were dropped because they had no durable id
    pub missing: usize,
}

/// Map element references in `doc` to their durable identities
pub fn capture(doc: &dyn HostDocument, refs: &[ElementId]) -> HashMap<ElementId, IdentityToken> {
    let mut captured = HashMap::with_capacity(refs.len());
    for &id in refs {
        match doc.durable_id(id) {
            Ok(Some(token)) => {
                captured.insert(id, token);
            }
            Ok(None) => {
                tracing::trace!(element = %id, "Element has no durable identity");
            }
            Err(e) => {
                tracing::debug!(element = %id, error = %e, "Skipping element during capture");
            }
        }
    }
    captured
}

/// Capture tokens for `refs`, keeping member order and dropping duplicates
pub fn capture_ordered(doc: &dyn HostDocument, refs: &[ElementId]) -> CaptureOutcome {
    let captured = capture(doc, refs);
    let mut seen = HashSet::with_capacity(captured.len());
    let mut outcome = CaptureOutcome::default();

    for id in refs {
        match captured.get(id) {
            Some(token) => {
                if seen.insert(token.clone()) {
                    outcome.tokens.push(token.clone());
                }
            }
            None => outcome.missing += 1,
        }
    }
    outcome
}

/// Map durable identities back to element references in `doc`
pub fn resolve<'a, I>(doc: &dyn HostDocument, tokens: I) -> HashMap<IdentityToken, ElementId>
where
    I: IntoIterator<Item = &'a IdentityToken>,
{
    let mut resolved = HashMap::new();
    for token in tokens {
        match doc.element_by_durable_id(token) {
            Ok(Some(id)) => {
                resolved.insert(token.clone(), id);
            }
            Ok(None) => {
                tracing::trace!(token = %token, "Token did not resolve");
            }
            Err(e) => {
                tracing::debug!(token = %token, error = %e, "Skipping token during resolution");
            }
        }
    }
    resolved
}

/// Resolve `tokens` into element references, in token order
pub fn resolve_ordered(doc: &dyn HostDocument, tokens: &[IdentityToken]) -> Vec<ElementId> {
    let resolved = resolve(doc, tokens);
    tokens
        .iter()
        .filter_map(|token| resolved.get(token).copied())
        .collect()
}
