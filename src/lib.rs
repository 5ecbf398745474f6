//! **Semantic versioning for recipe documents.**
//!
//! `recipe-revision` compares a recipe's last committed snapshot with an
//! edited one, classifies every difference as a patch, minor or major change,
//! and commits version bumps that can never go below the allergen safety
//! floor.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: snapshots, allergen identifiers, tiers, versions and the
//!   catalog lookup capabilities.
//! - **[`diff`]**: the [`ChangeClassifier`], which resolves effective allergens
//!   through the component list and runs the change rules in a fixed order.
//! - **[`bump`]**: the [`VersionBumpEngine`], which enforces the safety floor
//!   and appends audit entries.
//! - **[`pipeline`]** and **[`reports`]**: file loading, report rendering and
//!   exit codes for the command-line tool.
//!
//! ## Getting Started
//!
//! ```no_run
//! use recipe_revision::{ChangeClassifier, InMemoryCatalog, Snapshot, Tier, Version};
//! use recipe_revision::{BumpRequest, VersionBumpEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = InMemoryCatalog::new();
//!     let saved = Snapshot::new("Scones", Version::new(1, 0, 0));
//!     let mut edited = saved.clone();
//!     edited.yield_amount = 12.0;
//!
//!     let result = ChangeClassifier::new().classify(&saved, &edited, &catalog, &catalog)?;
//!     println!("Suggested {}: {}", result.suggested_tier, result.rationale);
//!
//!     let request = BumpRequest::for_classification(&result, Tier::Minor, "Bigger batch", "ana");
//!     VersionBumpEngine::new().commit(&mut edited, &request)?;
//!     assert_eq!(edited.version, Version::new(1, 1, 0));
//!     Ok(())
//! }
//! ```

#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::similar_names
)]

pub mod bump;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use bump::{BumpRequest, VersionBumpEngine, VersionBumpResult};
pub use config::{AppConfig, AppConfigBuilder, ClassifierConfig, ConfigError, Validatable};
pub use diff::{
    classify, ChangeCategory, ChangeClassifier, ChangeRule, ClassificationResult, DetectedChange,
};
pub use error::{ErrorContext, OptionContext, Result, RevisionError};
pub use model::{
    Allergen, AttributeId, AttributeSet, AuditEntry, CatalogAttributes, CatalogLookup,
    ComponentEntry, ComponentKind, InMemoryCatalog, NestedLookup, SafetyAttributes, Snapshot,
    Status, Tier, Version,
};
pub use reports::{ReportFormat, ReportGenerator};
