//! Tiered version bumps.
//!
//! The [`VersionBumpEngine`] is where the safety floor is enforced: a bump
//! whose tier is below the classification's minimum is rejected, never
//! silently raised.

mod engine;

pub use engine::{BumpRequest, VersionBumpEngine, VersionBumpResult};
