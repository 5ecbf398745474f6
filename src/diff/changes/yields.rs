//! Yield rule.

use crate::diff::traits::{ChangeRule, RuleContext};
use crate::diff::{ChangeCategory, DetectedChange};
use crate::model::Tier;

/// Yield amount or unit changed. Units compare trimmed and case-insensitively.
pub struct YieldRule;

impl ChangeRule for YieldRule {
    fn evaluate(&self, ctx: &mut RuleContext<'_>) -> Vec<DetectedChange> {
        let (previous, current) = (ctx.previous, ctx.current);
        #[allow(clippy::float_cmp)]
        let amount_changed = previous.yield_amount != current.yield_amount;
        let unit_changed = previous.yield_unit.trim().to_lowercase()
            != current.yield_unit.trim().to_lowercase();

        if !amount_changed && !unit_changed {
            return Vec::new();
        }

        vec![DetectedChange::advisory(
            "yield",
            ChangeCategory::Yield,
            Tier::Minor,
            format!(
                "Yield changed from {} {} to {} {}",
                previous.yield_amount,
                previous.yield_unit.trim(),
                current.yield_amount,
                current.yield_unit.trim()
            ),
            "Yield changed; portioning and labels need review",
        )]
    }

    fn name(&self) -> &'static str {
        "YieldRule"
    }
}
