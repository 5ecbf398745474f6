//! Summary report generator for shell output.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::diff::ClassificationResult;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if !colored {
        return text.to_string();
    }
    match color {
        "red" => format!("\x1b[31m{text}\x1b[0m"),
        "green" => format!("\x1b[32m{text}\x1b[0m"),
        "yellow" => format!("\x1b[33m{text}\x1b[0m"),
        "cyan" => format!("\x1b[36m{text}\x1b[0m"),
        "bold" => format!("\x1b[1m{text}\x1b[0m"),
        "dim" => format!("\x1b[2m{text}\x1b[0m"),
        _ => text.to_string(),
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    colored: bool,
}

impl SummaryReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, result: &ClassificationResult) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(self.color("Revision Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        if !result.has_changes {
            lines.push(format!("  {}", self.color("No changes detected", "dim")));
            return Ok(lines.join("\n"));
        }

        let tier_color = if result.has_safety_floor { "red" } else { "yellow" };
        lines.push(format!(
            "{} {}",
            self.color("Suggested tier:", "cyan"),
            self.color(result.suggested_tier.label(), tier_color)
        ));
        lines.push(format!(
            "{}   {}",
            self.color("Minimum tier:", "cyan"),
            result.minimum_tier
        ));
        lines.push(format!("{}      {}", self.color("Rationale:", "cyan"), result.rationale));

        if result.has_safety_floor {
            lines.push(String::new());
            lines.push(self.color(
                &format!(
                    "SAFETY FLOOR: commit must be at least {}",
                    result.minimum_tier
                ),
                "red",
            ));
        }

        lines.push(String::new());
        lines.push(self.color(&format!("Changes ({}):", result.changes.len()), "bold"));
        for change in &result.changes {
            let marker = if change.is_safety_floor {
                format!(" {}", self.color("(safety floor)", "red"))
            } else {
                String::new()
            };
            lines.push(format!(
                "  [{}] {}: {}{}",
                change.suggested_tier, change.category, change.description, marker
            ));
        }

        let dangling = result.dangling_references().count();
        if dangling > 0 {
            lines.push(String::new());
            lines.push(self.color(
                &format!(
                    "Note: {dangling} component reference(s) could not be resolved and contribute no allergens"
                ),
                "yellow",
            ));
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{ChangeCategory, DetectedChange};
    use crate::model::Tier;

    #[test]
    fn test_unchanged_summary() {
        let report = SummaryReporter::new()
            .no_color()
            .generate(&ClassificationResult::unchanged())
            .unwrap();
        insta::assert_snapshot!(report, @r"
        Revision Summary
        ────────────────────────────────────────
          No changes detected
        ");
    }

    #[test]
    fn test_safety_floor_summary() {
        let result = ClassificationResult::from_changes(vec![
            DetectedChange::safety_floor(
                "present-added:peanuts",
                ChangeCategory::PresentAttribute,
                "Allergen added: peanuts",
                "New definite-presence hazard: peanuts",
            ),
            DetectedChange::advisory(
                "yield",
                ChangeCategory::Yield,
                Tier::Minor,
                "Yield changed from 2 loaves to 3 loaves",
                "Yield changed",
            ),
        ]);
        let report = SummaryReporter::new().no_color().generate(&result).unwrap();
        insta::assert_snapshot!(report, @r"
        Revision Summary
        ────────────────────────────────────────
        Suggested tier: major
        Minimum tier:   major
        Rationale:      New definite-presence hazard: peanuts

        SAFETY FLOOR: commit must be at least major

        Changes (2):
          [major] Allergens: Allergen added: peanuts (safety floor)
          [minor] Yield: Yield changed from 2 loaves to 3 loaves
        ");
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let report = SummaryReporter::new()
            .generate(&ClassificationResult::unchanged())
            .unwrap();
        assert!(report.contains("\x1b["));
    }
}
