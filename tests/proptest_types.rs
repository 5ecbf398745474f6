//! Property-based tests for classification and versioning invariants.

use proptest::prelude::*;
use recipe_revision::bump::{BumpRequest, VersionBumpEngine};
use recipe_revision::diff::{
    aggregate, diff_sets, resolve_effective_present, ChangeCategory, ClassificationResult,
    DetectedChange, MatchMode,
};
use recipe_revision::model::{
    Allergen, CatalogAttributes, ComponentEntry, InMemoryCatalog, Snapshot, Tier, Version,
};

const REFERENCES: [&str; 6] = ["flour", "butter", "eggs", "sesame", "water", "unknown"];

fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::new()
        .with_item("flour", CatalogAttributes::new().containing(Allergen::Gluten))
        .with_item("butter", CatalogAttributes::new().containing(Allergen::Milk))
        .with_item("eggs", CatalogAttributes::new().containing(Allergen::Eggs))
        .with_item("sesame", CatalogAttributes::new().containing(Allergen::Sesame))
        .with_item("water", CatalogAttributes::new())
}

fn components_strategy() -> impl Strategy<Value = Vec<ComponentEntry>> {
    prop::collection::vec(0..REFERENCES.len(), 0..12).prop_map(|picks| {
        picks
            .into_iter()
            .enumerate()
            .map(|(i, pick)| {
                ComponentEntry::ingredient(format!("c{i}"), REFERENCES[pick])
                    .with_reference(REFERENCES[pick])
            })
            .collect()
    })
}

fn tier_strategy() -> impl Strategy<Value = Tier> {
    prop_oneof![Just(Tier::Patch), Just(Tier::Minor), Just(Tier::Major)]
}

fn change_strategy() -> impl Strategy<Value = DetectedChange> {
    (tier_strategy(), any::<bool>(), "[a-z]{1,8}").prop_map(|(tier, floor, id)| {
        if floor {
            DetectedChange::safety_floor(id.clone(), ChangeCategory::Component, "d", id)
        } else {
            DetectedChange::advisory(id.clone(), ChangeCategory::Component, tier, "d", id)
        }
    })
}

proptest! {
    #[test]
    fn diff_sets_is_symmetric(
        a in prop::collection::vec("[a-z]{0,6}", 0..10),
        b in prop::collection::vec("[a-z]{0,6}", 0..10),
    ) {
        let forward = diff_sets(&a, &b, MatchMode::Exact);
        let backward = diff_sets(&b, &a, MatchMode::Exact);
        prop_assert_eq!(forward.added, backward.removed);
        prop_assert_eq!(forward.removed, backward.added);
    }

    #[test]
    fn diff_of_a_set_with_itself_is_empty(a in prop::collection::vec("\\PC{0,12}", 0..10)) {
        prop_assert!(diff_sets(&a, &a, MatchMode::NaturalLanguage).is_empty());
    }

    #[test]
    fn resolution_ignores_component_order(components in components_strategy()) {
        let catalog = catalog();
        let forward = resolve_effective_present(&components, &catalog, &catalog);
        let mut reversed = components.clone();
        reversed.reverse();
        let backward = resolve_effective_present(&reversed, &catalog, &catalog);
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn suggested_never_below_minimum(changes in prop::collection::vec(change_strategy(), 0..16)) {
        let summary = aggregate(&changes);
        prop_assert!(summary.suggested_tier >= summary.minimum_tier);
        if changes.iter().any(|c| c.is_safety_floor) {
            prop_assert_eq!(summary.minimum_tier, Tier::Major);
            prop_assert!(summary.has_safety_floor);
        }
    }

    #[test]
    fn accepted_bumps_strictly_increase(
        start in (0u64..1000, 0u64..1000, 0u64..1000),
        tiers in prop::collection::vec(tier_strategy(), 1..20),
    ) {
        let engine = VersionBumpEngine::new();
        let mut document = Snapshot::new("Bread", Version::new(start.0, start.1, start.2));
        for tier in tiers {
            let before = document.version;
            let request = BumpRequest::for_classification(
                &ClassificationResult::unchanged(),
                tier,
                "revision",
                "prop",
            );
            engine.commit(&mut document, &request).unwrap();
            prop_assert!(document.version > before);
        }
    }

    #[test]
    fn version_display_parses_back(major in any::<u32>(), minor in any::<u32>(), patch in any::<u32>()) {
        let version = Version::new(u64::from(major), u64::from(minor), u64::from(patch));
        let parsed: Version = version.to_string().parse().unwrap();
        prop_assert_eq!(parsed, version);
    }
}
