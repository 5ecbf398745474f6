//! Change classifier implementation.

use super::changes::default_rules;
use super::resolver::{DanglingReference, Resolver};
use super::traits::{ChangeRule, RuleContext};
use super::{ChangeCategory, ClassificationResult, DetectedChange};
use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::model::{CatalogLookup, ComponentKind, NestedLookup, Snapshot, Tier};
use std::collections::BTreeSet;

/// Classifies the delta between a saved snapshot and an unsaved one.
pub struct ChangeClassifier {
    config: ClassifierConfig,
    rules: Vec<Box<dyn ChangeRule>>,
}

impl ChangeClassifier {
    /// Create a classifier with default settings and the standard rule order
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
            rules: default_rules(),
        }
    }

    /// Replace the classifier configuration
    #[must_use]
    pub fn with_config(mut self, config: ClassifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the classifier configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify the changes from `previous` to `current`.
    ///
    /// Fails with a malformed-snapshot error, and no partial result, if either
    /// snapshot is structurally invalid. Unresolvable component references do
    /// not fail classification.
    pub fn classify(
        &self,
        previous: &Snapshot,
        current: &Snapshot,
        catalog: &dyn CatalogLookup,
        nested: &dyn NestedLookup,
    ) -> Result<ClassificationResult> {
        previous.validate("previous")?;
        current.validate("current")?;

        // Identical classification-relevant content cannot produce a change
        let fingerprint = previous.classification_fingerprint();
        if fingerprint != 0 && fingerprint == current.classification_fingerprint() {
            tracing::debug!("Snapshots are identical, skipping rules");
            return Ok(ClassificationResult::unchanged());
        }

        let resolver = Resolver::new(catalog, nested)
            .with_parallel_threshold(self.config.parallel_resolution_threshold);
        let previous_resolution = resolver.resolve(&previous.components);
        let current_resolution = resolver.resolve(&current.components);

        let mut ctx = RuleContext::new(previous, current, previous_resolution, current_resolution);
        let mut changes = Vec::new();
        for rule in &self.rules {
            let found = rule.evaluate(&mut ctx);
            tracing::debug!(rule = rule.name(), changes = found.len(), "Rule evaluated");
            changes.extend(found);
        }

        if self.config.report_dangling_references && !changes.is_empty() {
            changes.extend(dangling_changes(
                &ctx.previous_resolution.dangling,
                &ctx.current_resolution.dangling,
            ));
        }

        let result = ClassificationResult::from_changes(changes);
        tracing::info!(
            changes = result.changes.len(),
            suggested = %result.suggested_tier,
            minimum = %result.minimum_tier,
            "Classified {} change(s){}",
            result.changes.len(),
            if result.has_safety_floor {
                ", safety floor applies"
            } else {
                ""
            }
        );
        Ok(result)
    }
}

impl Default for ChangeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify with default settings.
pub fn classify(
    previous: &Snapshot,
    current: &Snapshot,
    catalog: &dyn CatalogLookup,
    nested: &dyn NestedLookup,
) -> Result<ClassificationResult> {
    ChangeClassifier::new().classify(previous, current, catalog, nested)
}

/// Advisories for every distinct unresolved reference on either side.
///
/// Current-side references come first. A previous-side reference is only
/// reported when the current snapshot does not carry the same one, so a
/// removed component whose hazards could not be resolved still shows up.
fn dangling_changes(
    previous: &[DanglingReference],
    current: &[DanglingReference],
) -> Vec<DetectedChange> {
    let mut seen = BTreeSet::new();
    let mut changes = Vec::new();
    for dangling in current {
        if seen.insert((dangling.component_id.as_str(), dangling.reference.as_str())) {
            changes.push(dangling_change(dangling, false));
        }
    }
    for dangling in previous {
        if seen.insert((dangling.component_id.as_str(), dangling.reference.as_str())) {
            changes.push(dangling_change(dangling, true));
        }
    }
    changes
}

fn dangling_change(dangling: &DanglingReference, previous_only: bool) -> DetectedChange {
    let target = match dangling.kind {
        ComponentKind::DirectReference => "catalog item",
        ComponentKind::NestedDocumentReference => "recipe",
    };
    let (id, description, reason) = if previous_only {
        (
            format!("dangling-previous:{}", dangling.component_id),
            format!(
                "Saved component {} referenced unknown {target} '{}'",
                dangling.component_name, dangling.reference
            ),
            "Hazards it carried could not be resolved and are not compared; verify the catalog",
        )
    } else {
        (
            format!("dangling:{}", dangling.component_id),
            format!(
                "Component {} references unknown {target} '{}'",
                dangling.component_name, dangling.reference
            ),
            "Unresolved reference contributes no allergens; verify the catalog",
        )
    };
    DetectedChange::advisory(
        id,
        ChangeCategory::DanglingReference,
        Tier::Patch,
        description,
        reason,
    )
}
