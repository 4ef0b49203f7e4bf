//! Transactional scopes around document mutation
//!
//! Both helpers commit when the closure succeeds and roll back when it fails,
//! then hand the closure's error back to the caller. Nesting a transaction
//! inside a group means a failure tears down both scopes.

use super::traits::HostDocument;
use crate::domain::errors::HostError;

/// Run `f` inside a transaction group
///
/// On `Ok` the group is assimilated; on `Err` it is rolled back.
pub fn with_transaction_group<T, E, F>(
    doc: &mut dyn HostDocument,
    name: &str,
    f: F,
) -> Result<T, E>
where
    E: From<HostError>,
    F: FnOnce(&mut dyn HostDocument) -> Result<T, E>,
{
    doc.start_transaction_group(name)?;
    match f(doc) {
        Ok(value) => {
            doc.assimilate_transaction_group()?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = doc.rollback_transaction_group() {
                tracing::warn!(
                    group = name,
                    error = %rollback_err,
                    "Failed to roll back transaction group"
                );
            }
            Err(e)
        }
    }
}

/// Run `f` inside a transaction
///
/// On `Ok` the transaction is committed; on `Err` it is rolled back.
pub fn with_transaction<T, E, F>(doc: &mut dyn HostDocument, name: &str, f: F) -> Result<T, E>
where
    E: From<HostError>,
    F: FnOnce(&mut dyn HostDocument) -> Result<T, E>,
{
    doc.start_transaction(name)?;
    match f(doc) {
        Ok(value) => match doc.commit_transaction() {
            Ok(()) => Ok(value),
            Err(commit_err) => {
                if let Err(rollback_err) = doc.rollback_transaction() {
                    tracing::warn!(
                        transaction = name,
                        error = %rollback_err,
                        "Failed to roll back transaction after commit failure"
                    );
                }
                Err(commit_err.into())
            }
        },
        Err(e) => {
            if let Err(rollback_err) = doc.rollback_transaction() {
                tracing::warn!(
                    transaction = name,
                    error = %rollback_err,
                    "Failed to roll back transaction"
                );
            }
            Err(e)
        }
    }
}
