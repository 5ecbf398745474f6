//! Tier aggregation over a change list.

use super::DetectedChange;
use crate::model::Tier;

/// Rationale reported when nothing changed.
pub const NO_CHANGES_RATIONALE: &str = "No changes detected";

/// Overall tiers for a change list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSummary {
    /// Highest tier of any change
    pub suggested_tier: Tier,
    /// Highest tier of any safety-floor change
    pub minimum_tier: Tier,
    pub has_safety_floor: bool,
    /// Reason of the first change at the suggested tier
    pub rationale: String,
}

/// Reduce a change list to its tier summary.
///
/// The rationale tie-break (first change in evaluation order) is a
/// convenience for display; callers should not depend on which of several
/// equally-ranked reasons is picked.
#[must_use]
pub fn aggregate(changes: &[DetectedChange]) -> TierSummary {
    let suggested_tier = changes
        .iter()
        .map(|c| c.suggested_tier)
        .max()
        .unwrap_or(Tier::Patch);
    let minimum_tier = changes
        .iter()
        .filter(|c| c.is_safety_floor)
        .map(|c| c.suggested_tier)
        .max()
        .unwrap_or(Tier::Patch);
    let rationale = changes
        .iter()
        .find(|c| c.suggested_tier == suggested_tier)
        .map_or_else(|| NO_CHANGES_RATIONALE.to_string(), |c| c.reason.clone());

    TierSummary {
        suggested_tier,
        minimum_tier,
        has_safety_floor: minimum_tier > Tier::Patch,
        rationale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ChangeCategory;

    fn change(id: &str, tier: Tier, floor: bool) -> DetectedChange {
        DetectedChange {
            id: id.to_string(),
            category: ChangeCategory::Component,
            description: String::new(),
            suggested_tier: tier,
            is_safety_floor: floor,
            reason: format!("reason {id}"),
        }
    }

    #[test]
    fn test_empty_defaults_to_patch() {
        let summary = aggregate(&[]);
        assert_eq!(summary.suggested_tier, Tier::Patch);
        assert_eq!(summary.minimum_tier, Tier::Patch);
        assert!(!summary.has_safety_floor);
        assert_eq!(summary.rationale, NO_CHANGES_RATIONALE);
    }

    #[test]
    fn test_minimum_only_counts_floor_changes() {
        let summary = aggregate(&[change("a", Tier::Major, false), change("b", Tier::Minor, false)]);
        assert_eq!(summary.suggested_tier, Tier::Major);
        assert_eq!(summary.minimum_tier, Tier::Patch);
        assert!(!summary.has_safety_floor);
    }

    #[test]
    fn test_rationale_is_first_at_top_tier() {
        let summary = aggregate(&[
            change("a", Tier::Minor, false),
            change("b", Tier::Major, true),
            change("c", Tier::Major, false),
        ]);
        assert_eq!(summary.rationale, "reason b");
        assert_eq!(summary.minimum_tier, Tier::Major);
        assert!(summary.has_safety_floor);
    }
}
