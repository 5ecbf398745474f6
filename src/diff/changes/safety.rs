//! Rules over the cached safety-attribute fields.

use crate::diff::sets::{diff_ordered_sets, diff_sets, MatchMode};
use crate::diff::traits::{ChangeRule, RuleContext};
use crate::diff::{ChangeCategory, DetectedChange};
use crate::model::Tier;

/// Definite allergens added to or removed from the snapshot's own list.
///
/// Both directions impose the safety floor: an addition is a new hazard, a
/// removal gives recipients false confidence unless they are told.
pub struct PresentAttributeRule;

impl ChangeRule for PresentAttributeRule {
    fn evaluate(&self, ctx: &mut RuleContext<'_>) -> Vec<DetectedChange> {
        let diff = diff_ordered_sets(&ctx.current_safety.present, &ctx.previous_safety.present);
        let mut changes = Vec::with_capacity(diff.added.len() + diff.removed.len());

        for id in diff.added {
            changes.push(DetectedChange::safety_floor(
                format!("present-added:{id}"),
                ChangeCategory::PresentAttribute,
                format!("Allergen added: {id}"),
                format!("New definite-presence hazard: {id}"),
            ));
            ctx.ledger.record(id);
        }
        for id in diff.removed {
            changes.push(DetectedChange::safety_floor(
                format!("present-removed:{id}"),
                ChangeCategory::PresentAttribute,
                format!("Allergen removed: {id}"),
                format!("False-confidence risk: removal of {id} also requires mandatory notice"),
            ));
            ctx.ledger.record(id);
        }
        changes
    }

    fn name(&self) -> &'static str {
        "PresentAttributeRule"
    }
}

/// May-contain allergens added or removed.
pub struct PossibleAttributeRule;

impl ChangeRule for PossibleAttributeRule {
    fn evaluate(&self, ctx: &mut RuleContext<'_>) -> Vec<DetectedChange> {
        let diff = diff_ordered_sets(&ctx.current_safety.possible, &ctx.previous_safety.possible);

        let added = diff.added.into_iter().map(|id| {
            DetectedChange::advisory(
                format!("possible-added:{id}"),
                ChangeCategory::PossibleAttribute,
                Tier::Minor,
                format!("May-contain allergen added: {id}"),
                format!("Supplier risk for {id} must be reviewed"),
            )
        });
        let removed = diff.removed.into_iter().map(|id| {
            DetectedChange::advisory(
                format!("possible-removed:{id}"),
                ChangeCategory::PossibleAttribute,
                Tier::Minor,
                format!("May-contain allergen removed: {id}"),
                format!("Supplier risk for {id} no longer declared"),
            )
        });
        added.chain(removed).collect()
    }

    fn name(&self) -> &'static str {
        "PossibleAttributeRule"
    }
}

/// Cross-contact notes, reported as a single aggregated change.
pub struct CrossContactRule;

impl ChangeRule for CrossContactRule {
    fn evaluate(&self, ctx: &mut RuleContext<'_>) -> Vec<DetectedChange> {
        let diff = diff_sets(
            &ctx.current_safety.cross_contact,
            &ctx.previous_safety.cross_contact,
            MatchMode::NaturalLanguage,
        );
        if diff.is_empty() {
            return Vec::new();
        }
        vec![DetectedChange::advisory(
            "cross-contact",
            ChangeCategory::CrossContact,
            Tier::Patch,
            format!(
                "Cross-contact notes changed: {} added, {} removed",
                diff.added.len(),
                diff.removed.len()
            ),
            "Environmental cross-contact notes updated",
        )]
    }

    fn name(&self) -> &'static str {
        "CrossContactRule"
    }
}
