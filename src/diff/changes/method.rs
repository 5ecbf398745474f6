//! Method rule.

use crate::diff::traits::{ChangeRule, RuleContext};
use crate::diff::{ChangeCategory, DetectedChange};
use crate::model::{MethodStep, Tier};

/// Step count or any aligned step's instruction, temperature or duration
/// changed. Reported as one aggregated change.
pub struct MethodRule;

fn step_changed(previous: &MethodStep, current: &MethodStep) -> bool {
    previous.instruction.trim() != current.instruction.trim()
        || previous.temperature != current.temperature
        || previous.duration_minutes != current.duration_minutes
}

impl ChangeRule for MethodRule {
    fn evaluate(&self, ctx: &mut RuleContext<'_>) -> Vec<DetectedChange> {
        let previous = &ctx.previous.method_steps;
        let current = &ctx.current.method_steps;

        let edited = previous
            .iter()
            .zip(current.iter())
            .filter(|(p, c)| step_changed(p, c))
            .count();
        let count_changed = previous.len() != current.len();

        if edited == 0 && !count_changed {
            return Vec::new();
        }

        let mut parts = Vec::new();
        if count_changed {
            parts.push(format!("{} to {} steps", previous.len(), current.len()));
        }
        if edited > 0 {
            let noun = if edited == 1 { "step" } else { "steps" };
            parts.push(format!("{edited} {noun} edited"));
        }

        vec![DetectedChange::advisory(
            "method",
            ChangeCategory::Method,
            Tier::Minor,
            format!("Method changed: {}", parts.join(", ")),
            "Method changed; production staff need to review",
        )]
    }

    fn name(&self) -> &'static str {
        "MethodRule"
    }
}
