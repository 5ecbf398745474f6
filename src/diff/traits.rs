//! Trait definitions for classification rules.
//!
//! Each rule inspects one aspect of a snapshot pair and reports zero or more
//! [`DetectedChange`]s. Rules run in a fixed order and share a
//! [`RuleContext`], whose [`AttributionLedger`] lets later rules see which
//! allergens earlier rules already reported.

use super::resolver::Resolution;
use super::DetectedChange;
use crate::model::{AttributeId, AttributeSet, SafetyAttributes, Snapshot};
use std::collections::BTreeSet;

/// Trait for one classification rule.
pub trait ChangeRule: Send + Sync {
    /// Compare the context's snapshots and report changes in order.
    fn evaluate(&self, ctx: &mut RuleContext<'_>) -> Vec<DetectedChange>;

    /// Name of this rule for logging/debugging.
    fn name(&self) -> &str;
}

/// Allergens already reported by a safety-floor change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributionLedger {
    attributed: BTreeSet<AttributeId>,
}

impl AttributionLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a change covers this attribute.
    pub fn record(&mut self, id: AttributeId) {
        self.attributed.insert(id);
    }

    #[must_use]
    pub fn is_attributed(&self, id: &AttributeId) -> bool {
        self.attributed.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributed.is_empty()
    }
}

/// Shared state for one classification run.
///
/// Snapshots are borrowed read-only; safety attributes are held normalized so
/// that a `present`/`possible` overlap never shows up as a change.
pub struct RuleContext<'a> {
    pub previous: &'a Snapshot,
    pub current: &'a Snapshot,
    pub previous_safety: SafetyAttributes,
    pub current_safety: SafetyAttributes,
    /// Effective allergens derived from the previous component list
    pub previous_resolution: Resolution,
    /// Effective allergens derived from the current component list
    pub current_resolution: Resolution,
    pub ledger: AttributionLedger,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        previous: &'a Snapshot,
        current: &'a Snapshot,
        previous_resolution: Resolution,
        current_resolution: Resolution,
    ) -> Self {
        Self {
            previous,
            current,
            previous_safety: previous.safety_attributes.normalized(),
            current_safety: current.safety_attributes.normalized(),
            previous_resolution,
            current_resolution,
            ledger: AttributionLedger::new(),
        }
    }

    /// The cached `present` set of the previous snapshot.
    #[must_use]
    pub fn previous_present(&self) -> &AttributeSet {
        &self.previous_safety.present
    }
}
