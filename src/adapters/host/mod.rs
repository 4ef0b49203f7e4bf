//! Host document interface
//!
//! This module defines the boundary between Setport and the CAD host:
//!
//! - [`HostApplication`] / [`HostDocument`] - the traits a host implements
//! - [`DocumentHandle`] - open-work-close with guaranteed release
//! - [`with_transaction`] / [`with_transaction_group`] - rollback-safe scopes

pub mod handle;
pub mod traits;
pub mod transaction;

pub use handle::DocumentHandle;
pub use traits::{
    HostApplication, HostDocument, HostResult, OpenOptions, SaveAsOptions, SaveOptions,
};
pub use transaction::{with_transaction, with_transaction_group};
