//! Recipe document model.
//!
//! Defines the [`Snapshot`] compared by the classifier, the typed safety
//! attribute identifiers, version numbers with their audit records, and the
//! catalog lookup capabilities injected by callers.

mod attributes;
mod catalog;
mod snapshot;
mod tier;
mod version;

pub use attributes::*;
pub use catalog::*;
pub use snapshot::*;
pub use tier::*;
pub use version::*;
