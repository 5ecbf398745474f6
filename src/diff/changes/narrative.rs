//! Free-text rule.

use crate::diff::sets::text_changed;
use crate::diff::traits::{ChangeRule, RuleContext};
use crate::diff::{ChangeCategory, DetectedChange};
use crate::model::Tier;

/// Narrative fields changed. Reported as one aggregated patch change.
pub struct FreeTextRule;

impl ChangeRule for FreeTextRule {
    fn evaluate(&self, ctx: &mut RuleContext<'_>) -> Vec<DetectedChange> {
        let previous = &ctx.previous.free_text;
        let current = &ctx.current.free_text;

        let mut fields = Vec::new();
        if text_changed(previous.description.as_deref(), current.description.as_deref()) {
            fields.push("description");
        }
        if text_changed(
            previous.production_notes.as_deref(),
            current.production_notes.as_deref(),
        ) {
            fields.push("production notes");
        }
        if fields.is_empty() {
            return Vec::new();
        }

        vec![DetectedChange::advisory(
            "free-text",
            ChangeCategory::FreeText,
            Tier::Patch,
            format!("Text changed: {}", fields.join(", ")),
            "Descriptive text updated",
        )]
    }

    fn name(&self) -> &'static str {
        "FreeTextRule"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::changes::test_support::{base_snapshot, run_rule};
    use crate::model::InMemoryCatalog;

    #[test]
    fn test_both_fields_single_change() {
        let previous = base_snapshot();
        let mut current = base_snapshot();
        current.free_text.description = Some("A hearty loaf".to_string());
        current.free_text.production_notes = Some("Prove overnight".to_string());

        let (changes, _) = run_rule(&FreeTextRule, &previous, &current, &InMemoryCatalog::new());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].description, "Text changed: description, production notes");
        assert_eq!(changes[0].suggested_tier, Tier::Patch);
    }

    #[test]
    fn test_unchanged_text() {
        let previous = base_snapshot();
        let current = base_snapshot();
        let (changes, _) = run_rule(&FreeTextRule, &previous, &current, &InMemoryCatalog::new());
        assert!(changes.is_empty());
    }
}
