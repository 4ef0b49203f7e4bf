//! Recentering of exported selection sets
//!
//! - [`bounds`] - footprint union over one anchor category
//! - [`engine`] - transactional, lock-preserving translation to the origin

pub mod bounds;
pub mod engine;

pub use bounds::union_bounds;
pub use engine::{RecenterEngine, RecenterOutcome, RECENTER_GROUP_NAME, RECENTER_TRANSACTION_NAME};
