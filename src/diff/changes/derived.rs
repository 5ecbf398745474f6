//! Ingredient-sourced allergen reconciliation.

use crate::diff::sets::diff_ordered_sets;
use crate::diff::traits::{ChangeRule, RuleContext};
use crate::diff::{ChangeCategory, DetectedChange};

/// Allergens gained or lost through composition.
///
/// Diffs the effective allergen sets derived from each side's component list
/// rather than the cached `present` fields, which the editor may not have
/// recomputed yet. Allergens already covered by an earlier safety-floor change
/// (per the ledger) are skipped.
pub struct DerivedAttributeRule;

impl ChangeRule for DerivedAttributeRule {
    fn evaluate(&self, ctx: &mut RuleContext<'_>) -> Vec<DetectedChange> {
        let diff = diff_ordered_sets(
            &ctx.current_resolution.present,
            &ctx.previous_resolution.present,
        );
        let mut changes = Vec::new();

        for id in diff.added {
            if ctx.ledger.is_attributed(&id) {
                continue;
            }
            changes.push(DetectedChange::safety_floor(
                format!("derived-present-added:{id}"),
                ChangeCategory::DerivedAttribute,
                format!("Allergen {id} now derived from components"),
                format!("New definite-presence hazard: {id} derived from components"),
            ));
            ctx.ledger.record(id);
        }
        for id in diff.removed {
            if ctx.ledger.is_attributed(&id) {
                continue;
            }
            changes.push(DetectedChange::safety_floor(
                format!("derived-present-removed:{id}"),
                ChangeCategory::DerivedAttribute,
                format!("Allergen {id} no longer derived from components"),
                format!(
                    "False-confidence risk: {id} no longer derived from components; \
                     removal also requires mandatory notice"
                ),
            ));
            ctx.ledger.record(id);
        }

        changes
    }

    fn name(&self) -> &'static str {
        "DerivedAttributeRule"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::changes::test_support::{base_snapshot, run_rule};
    use crate::model::{Allergen, CatalogAttributes, ComponentEntry, InMemoryCatalog, Tier};

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new()
            .with_item("cream", CatalogAttributes::new().containing(Allergen::Milk))
            .with_item("oat-milk", CatalogAttributes::new().containing(Allergen::Gluten))
    }

    #[test]
    fn test_swap_changes_derived_profile_with_stale_cache() {
        let mut previous = base_snapshot();
        previous.components.push(ComponentEntry::ingredient("cream", "Cream"));
        previous.safety_attributes.present.insert(Allergen::Milk.into());
        let mut current = previous.clone();
        current.components = vec![ComponentEntry::ingredient("oat-milk", "Oat milk")];

        let (changes, _) = run_rule(&DerivedAttributeRule, &previous, &current, &catalog());
        let ids: Vec<_> = changes.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["derived-present-added:gluten", "derived-present-removed:milk"]
        );
        assert!(changes
            .iter()
            .all(|c| c.is_safety_floor && c.suggested_tier == Tier::Major));
    }

    #[test]
    fn test_no_change_when_components_identical() {
        let mut previous = base_snapshot();
        previous.components.push(ComponentEntry::ingredient("cream", "Cream"));
        let current = previous.clone();

        let (changes, _) = run_rule(&DerivedAttributeRule, &previous, &current, &catalog());
        assert!(changes.is_empty());
    }
}
