//! Effective allergen resolution over a component list.
//!
//! Direct references read the catalog; nested references read the nested
//! document's own resolved `present` set, one level deep. Lookup misses
//! contribute nothing and are reported as [`DanglingReference`]s.

use crate::model::{
    AttributeSet, CatalogLookup, ComponentEntry, ComponentKind, NestedLookup,
};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Component count at which lookups run in parallel by default.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// A component whose reference could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingReference {
    pub component_id: String,
    pub component_name: String,
    pub kind: ComponentKind,
    pub reference: String,
}

impl DanglingReference {
    fn from_entry(entry: &ComponentEntry) -> Self {
        Self {
            component_id: entry.id.clone(),
            component_name: entry.display_name().to_string(),
            kind: entry.kind,
            reference: entry.lookup_key().to_string(),
        }
    }
}

/// Outcome of resolving a component list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Union of every component's present attributes
    pub present: AttributeSet,
    /// Per-component contribution keyed by component id; `None` when dangling
    pub contributions: IndexMap<String, Option<AttributeSet>>,
    /// Unresolvable components, one per component id, in list order
    pub dangling: Vec<DanglingReference>,
}

impl Resolution {
    /// What a single component contributed; empty if unknown or dangling.
    #[must_use]
    pub fn contribution_of(&self, component_id: &str) -> AttributeSet {
        self.contributions
            .get(component_id)
            .cloned()
            .flatten()
            .unwrap_or_default()
    }
}

/// Resolves component lists against injected lookups.
pub struct Resolver<'a> {
    catalog: &'a dyn CatalogLookup,
    nested: &'a dyn NestedLookup,
    parallel_threshold: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a dyn CatalogLookup, nested: &'a dyn NestedLookup) -> Self {
        Self {
            catalog,
            nested,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Run lookups in parallel once a list has at least `threshold` entries.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Present attributes contributed by one component, or `None` if its
    /// reference does not resolve.
    #[must_use]
    pub fn resolve_component(&self, entry: &ComponentEntry) -> Option<AttributeSet> {
        let key = entry.lookup_key();
        match entry.kind {
            ComponentKind::DirectReference => self
                .catalog
                .catalog_attributes(key)
                .map(|attrs| attrs.present()),
            ComponentKind::NestedDocumentReference => self.nested.resolved_present(key),
        }
    }

    /// Resolve a whole component list.
    ///
    /// Every lookup completes before any result is folded, so the outcome is
    /// identical whether lookups ran sequentially or in parallel.
    #[must_use]
    pub fn resolve(&self, components: &[ComponentEntry]) -> Resolution {
        let lookups: Vec<Option<AttributeSet>> =
            if components.len() >= self.parallel_threshold.max(1) {
                components
                    .par_iter()
                    .map(|entry| self.resolve_component(entry))
                    .collect()
            } else {
                components
                    .iter()
                    .map(|entry| self.resolve_component(entry))
                    .collect()
            };

        let mut resolution = Resolution::default();
        for (entry, contribution) in components.iter().zip(lookups) {
            match &contribution {
                Some(present) => resolution.present.extend(present.iter().cloned()),
                None => {
                    if !resolution.contributions.contains_key(&entry.id) {
                        tracing::warn!(
                            component = %entry.id,
                            reference = %entry.lookup_key(),
                            "Unresolved {} reference contributes no attributes",
                            entry.kind
                        );
                        resolution.dangling.push(DanglingReference::from_entry(entry));
                    }
                }
            }
            resolution
                .contributions
                .entry(entry.id.clone())
                .or_insert(contribution);
        }
        resolution
    }
}

/// Effective present attributes of a component list.
///
/// Resolving the same list against the same lookups always yields the same
/// set, regardless of component order.
#[must_use]
pub fn resolve_effective_present(
    components: &[ComponentEntry],
    catalog: &dyn CatalogLookup,
    nested: &dyn NestedLookup,
) -> AttributeSet {
    Resolver::new(catalog, nested).resolve(components).present
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Allergen, AttributeId, CatalogAttributes, InMemoryCatalog};

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new()
            .with_item("butter", CatalogAttributes::new().containing(Allergen::Milk))
            .with_item("flour", CatalogAttributes::new().containing(Allergen::Gluten))
            .with_item("salt", CatalogAttributes::new())
            .with_document("pesto", [Allergen::TreeNuts.into(), Allergen::Milk.into()])
    }

    #[test]
    fn test_direct_and_nested_contributions() {
        let catalog = catalog();
        let components = vec![
            ComponentEntry::ingredient("butter", "Butter"),
            ComponentEntry::ingredient("salt", "Salt"),
            ComponentEntry::sub_recipe("pesto", "Pesto"),
        ];
        let present = resolve_effective_present(&components, &catalog, &catalog);
        let expected: AttributeSet = [Allergen::Milk, Allergen::TreeNuts]
            .into_iter()
            .map(AttributeId::from)
            .collect();
        assert_eq!(present, expected);
    }

    #[test]
    fn test_dangling_reference_contributes_nothing() {
        let catalog = catalog();
        let components = vec![
            ComponentEntry::ingredient("flour", "Flour"),
            ComponentEntry::ingredient("mystery", "Mystery spice"),
            ComponentEntry::sub_recipe("gravy", "Gravy"),
        ];
        let resolution = Resolver::new(&catalog, &catalog).resolve(&components);
        assert_eq!(resolution.present.len(), 1);
        assert_eq!(resolution.dangling.len(), 2);
        assert_eq!(resolution.dangling[0].reference, "mystery");
        assert_eq!(resolution.dangling[1].kind, ComponentKind::NestedDocumentReference);
        assert!(resolution.contribution_of("mystery").is_empty());
    }

    #[test]
    fn test_reference_overrides_id_for_lookup() {
        let catalog = catalog();
        let components = vec![ComponentEntry::ingredient("line-1", "Butter").with_reference("butter")];
        let present = resolve_effective_present(&components, &catalog, &catalog);
        assert!(present.contains(&Allergen::Milk.into()));
    }

    #[test]
    fn test_order_independent() {
        let catalog = catalog();
        let mut components = vec![
            ComponentEntry::ingredient("butter", "Butter"),
            ComponentEntry::ingredient("flour", "Flour"),
            ComponentEntry::sub_recipe("pesto", "Pesto"),
        ];
        let forward = resolve_effective_present(&components, &catalog, &catalog);
        components.reverse();
        let backward = resolve_effective_present(&components, &catalog, &catalog);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let catalog = catalog();
        let components: Vec<_> = (0..200)
            .map(|i| match i % 4 {
                0 => ComponentEntry::ingredient(format!("c{i}"), "Butter").with_reference("butter"),
                1 => ComponentEntry::ingredient(format!("c{i}"), "Flour").with_reference("flour"),
                2 => ComponentEntry::sub_recipe(format!("c{i}"), "Pesto").with_reference("pesto"),
                _ => ComponentEntry::ingredient(format!("c{i}"), "Unknown"),
            })
            .collect();

        let sequential = Resolver::new(&catalog, &catalog)
            .with_parallel_threshold(usize::MAX)
            .resolve(&components);
        let parallel = Resolver::new(&catalog, &catalog)
            .with_parallel_threshold(1)
            .resolve(&components);
        assert_eq!(sequential, parallel);
        assert_eq!(parallel.dangling.len(), 50);
    }
}
