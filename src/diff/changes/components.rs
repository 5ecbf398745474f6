//! Component add/remove rule.

use crate::diff::traits::{ChangeRule, RuleContext};
use crate::diff::{ChangeCategory, DetectedChange};
use crate::model::{join_attributes, AttributeSet, ComponentEntry, Tier};
use std::collections::HashSet;

/// Components added or removed, matched by stable identity.
///
/// An added component that brings a definite allergen missing from the
/// previous snapshot's `present` list imposes the safety floor. Removals are
/// minor here; a removal that drops a derived allergen is caught by
/// [`DerivedAttributeRule`](super::DerivedAttributeRule).
pub struct ComponentRule;

impl ComponentRule {
    fn added_change(ctx: &mut RuleContext<'_>, entry: &ComponentEntry) -> DetectedChange {
        let contribution = ctx.current_resolution.contribution_of(&entry.id);
        let introduced: AttributeSet = contribution
            .difference(ctx.previous_present())
            .cloned()
            .collect();

        let id = format!("component-added:{}", entry.id);
        let description = format!("Component added: {} ({})", entry.display_name(), entry.kind);

        if introduced.is_empty() {
            return DetectedChange::advisory(
                id,
                ChangeCategory::Component,
                Tier::Minor,
                description,
                format!("Composition changed: {} added", entry.display_name()),
            );
        }

        let change = DetectedChange::safety_floor(
            id,
            ChangeCategory::Component,
            description,
            format!(
                "New definite-presence hazard: {} introduces {}",
                entry.display_name(),
                join_attributes(&introduced)
            ),
        );
        for attribute in introduced {
            ctx.ledger.record(attribute);
        }
        change
    }
}

impl ChangeRule for ComponentRule {
    fn evaluate(&self, ctx: &mut RuleContext<'_>) -> Vec<DetectedChange> {
        let (previous, current) = (ctx.previous, ctx.current);
        let previous_ids: HashSet<&str> =
            previous.components.iter().map(|c| c.id.as_str()).collect();
        let current_ids: HashSet<&str> =
            current.components.iter().map(|c| c.id.as_str()).collect();

        let mut changes = Vec::new();

        for entry in current
            .components
            .iter()
            .filter(|c| !previous_ids.contains(c.id.as_str()))
        {
            changes.push(Self::added_change(ctx, entry));
        }

        for entry in previous
            .components
            .iter()
            .filter(|c| !current_ids.contains(c.id.as_str()))
        {
            changes.push(DetectedChange::advisory(
                format!("component-removed:{}", entry.id),
                ChangeCategory::Component,
                Tier::Minor,
                format!("Component removed: {} ({})", entry.display_name(), entry.kind),
                format!("Composition changed: {} removed", entry.display_name()),
            ));
        }

        changes
    }

    fn name(&self) -> &'static str {
        "ComponentRule"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::changes::test_support::{base_snapshot, run_rule};
    use crate::model::{Allergen, CatalogAttributes, InMemoryCatalog};

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new()
            .with_item("peanut-butter", CatalogAttributes::new().containing(Allergen::Peanuts))
            .with_item("butter", CatalogAttributes::new().containing(Allergen::Milk))
            .with_item("salt", CatalogAttributes::new())
    }

    #[test]
    fn test_added_component_with_new_allergen_is_floor() {
        let previous = base_snapshot();
        let mut current = base_snapshot();
        current
            .components
            .push(ComponentEntry::ingredient("peanut-butter", "Peanut butter"));

        let (changes, ledger) = run_rule(&ComponentRule, &previous, &current, &catalog());
        assert_eq!(changes.len(), 1);
        assert!(changes[0].is_safety_floor);
        assert_eq!(changes[0].suggested_tier, Tier::Major);
        assert!(changes[0].reason.contains("peanuts"));
        assert!(ledger.is_attributed(&Allergen::Peanuts.into()));
    }

    #[test]
    fn test_added_component_with_known_allergen_is_minor() {
        let mut previous = base_snapshot();
        previous.safety_attributes.present.insert(Allergen::Milk.into());
        let mut current = previous.clone();
        current.components.push(ComponentEntry::ingredient("butter", "Butter"));

        let (changes, ledger) = run_rule(&ComponentRule, &previous, &current, &catalog());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].suggested_tier, Tier::Minor);
        assert!(!changes[0].is_safety_floor);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_rename_is_not_add_remove() {
        let mut previous = base_snapshot();
        previous.components.push(ComponentEntry::ingredient("salt", "Salt"));
        let mut current = base_snapshot();
        current.components.push(ComponentEntry::ingredient("salt", "Sea salt"));

        let (changes, _) = run_rule(&ComponentRule, &previous, &current, &catalog());
        assert!(changes.is_empty());
    }

    #[test]
    fn test_removed_component_is_minor() {
        let mut previous = base_snapshot();
        previous.components.push(ComponentEntry::ingredient("butter", "Butter"));
        let current = base_snapshot();

        let (changes, _) = run_rule(&ComponentRule, &previous, &current, &catalog());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].id, "component-removed:butter");
        assert_eq!(changes[0].suggested_tier, Tier::Minor);
    }

    #[test]
    fn test_dangling_added_component_is_minor() {
        let previous = base_snapshot();
        let mut current = base_snapshot();
        current.components.push(ComponentEntry::ingredient("unknown", "Unknown"));

        let (changes, _) = run_rule(&ComponentRule, &previous, &current, &catalog());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].suggested_tier, Tier::Minor);
    }
}
