//! Change classification for recipe snapshots.
//!
//! # Architecture
//!
//! - [`sets`]: set and scalar comparison helpers
//! - [`resolver`]: effective allergen resolution over component lists
//! - [`changes`]: the individual [`ChangeRule`]s, run in a fixed order
//! - [`aggregate`]: reduces a change list to suggested and minimum tiers
//!
//! # Example
//!
//! ```ignore
//! use recipe_revision::diff::ChangeClassifier;
//!
//! let classifier = ChangeClassifier::new();
//! let result = classifier.classify(&saved, &edited, &catalog, &catalog)?;
//! if result.has_safety_floor {
//!     println!("Must be committed as {}", result.minimum_tier);
//! }
//! ```

pub mod aggregate;
pub mod changes;
mod engine;
pub mod resolver;
mod result;
pub mod sets;
pub mod traits;

pub use aggregate::{aggregate, TierSummary};
pub use engine::{classify, ChangeClassifier};
pub use resolver::{resolve_effective_present, DanglingReference, Resolution, Resolver};
pub use result::{ChangeCategory, ClassificationResult, DetectedChange};
pub use sets::{diff_ordered_sets, diff_sets, MatchMode, SetDiff};
pub use traits::{AttributionLedger, ChangeRule, RuleContext};
