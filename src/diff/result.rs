//! Classification result structures.

use super::aggregate::{aggregate, TierSummary};
use crate::model::Tier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which rule family produced a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeCategory {
    /// Definite allergen list edited directly
    PresentAttribute,
    /// May-contain list edited
    PossibleAttribute,
    CrossContact,
    Component,
    Yield,
    /// Allergen gained or lost through composition
    DerivedAttribute,
    Method,
    FreeText,
    /// Unresolvable component reference; informational only
    DanglingReference,
}

impl ChangeCategory {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PresentAttribute => "Allergens",
            Self::PossibleAttribute => "May contain",
            Self::CrossContact => "Cross-contact",
            Self::Component => "Components",
            Self::Yield => "Yield",
            Self::DerivedAttribute => "Derived allergens",
            Self::Method => "Method",
            Self::FreeText => "Notes",
            Self::DanglingReference => "Advisory",
        }
    }
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One atomic difference between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedChange {
    /// Stable within one classification run, e.g. `"present-added:peanuts"`
    pub id: String,
    pub category: ChangeCategory,
    pub description: String,
    pub suggested_tier: Tier,
    /// The operator may not choose a tier below this change's tier
    pub is_safety_floor: bool,
    pub reason: String,
}

impl DetectedChange {
    /// A change the operator may downgrade.
    pub fn advisory(
        id: impl Into<String>,
        category: ChangeCategory,
        tier: Tier,
        description: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            description: description.into(),
            suggested_tier: tier,
            is_safety_floor: false,
            reason: reason.into(),
        }
    }

    /// A safety-floor change, always at [`Tier::Major`].
    pub fn safety_floor(
        id: impl Into<String>,
        category: ChangeCategory,
        description: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            description: description.into(),
            suggested_tier: Tier::Major,
            is_safety_floor: true,
            reason: reason.into(),
        }
    }
}

/// Classification of the delta between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct ClassificationResult {
    /// In rule-evaluation order
    pub changes: Vec<DetectedChange>,
    pub has_changes: bool,
    pub suggested_tier: Tier,
    /// Lowest tier the operator may commit with
    pub minimum_tier: Tier,
    pub has_safety_floor: bool,
    pub rationale: String,
}

impl ClassificationResult {
    /// The result for two identical snapshots.
    pub fn unchanged() -> Self {
        Self::from_changes(Vec::new())
    }

    /// Aggregate a change list into a result.
    pub fn from_changes(changes: Vec<DetectedChange>) -> Self {
        let TierSummary {
            suggested_tier,
            minimum_tier,
            has_safety_floor,
            rationale,
        } = aggregate(&changes);
        Self {
            has_changes: !changes.is_empty(),
            changes,
            suggested_tier,
            minimum_tier,
            has_safety_floor,
            rationale,
        }
    }

    /// Whether committing at `tier` satisfies the safety floor.
    #[must_use]
    pub fn permits(&self, tier: Tier) -> bool {
        tier >= self.minimum_tier
    }

    /// Changes that impose the safety floor.
    pub fn floor_changes(&self) -> impl Iterator<Item = &DetectedChange> {
        self.changes.iter().filter(|c| c.is_safety_floor)
    }

    /// Informational dangling-reference changes.
    pub fn dangling_references(&self) -> impl Iterator<Item = &DetectedChange> {
        self.changes
            .iter()
            .filter(|c| c.category == ChangeCategory::DanglingReference)
    }

    /// Number of changes per category, in first-seen order.
    #[must_use]
    pub fn category_counts(&self) -> Vec<(ChangeCategory, usize)> {
        let mut counts: Vec<(ChangeCategory, usize)> = Vec::new();
        for change in &self.changes {
            match counts.iter_mut().find(|(c, _)| *c == change.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((change.category, 1)),
            }
        }
        counts
    }
}

impl Default for ClassificationResult {
    fn default() -> Self {
        Self::unchanged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_result() {
        let result = ClassificationResult::unchanged();
        assert!(!result.has_changes);
        assert!(!result.has_safety_floor);
        assert_eq!(result.suggested_tier, Tier::Patch);
        assert_eq!(result.minimum_tier, Tier::Patch);
        assert!(result.permits(Tier::Patch));
    }

    #[test]
    fn test_permits_respects_floor() {
        let result = ClassificationResult::from_changes(vec![DetectedChange::safety_floor(
            "present-added:milk",
            ChangeCategory::PresentAttribute,
            "Allergen added: milk",
            "New definite-presence hazard: milk",
        )]);
        assert!(result.has_safety_floor);
        assert!(!result.permits(Tier::Minor));
        assert!(result.permits(Tier::Major));
        assert_eq!(result.floor_changes().count(), 1);
    }

    #[test]
    fn test_category_counts() {
        let result = ClassificationResult::from_changes(vec![
            DetectedChange::advisory("a", ChangeCategory::Component, Tier::Minor, "", ""),
            DetectedChange::advisory("b", ChangeCategory::Yield, Tier::Minor, "", ""),
            DetectedChange::advisory("c", ChangeCategory::Component, Tier::Minor, "", ""),
        ]);
        assert_eq!(
            result.category_counts(),
            vec![(ChangeCategory::Component, 2), (ChangeCategory::Yield, 1)]
        );
    }
}
