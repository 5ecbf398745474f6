//! Pipeline orchestration for file-based revisions.
//!
//! Shared load → classify → report logic used by the CLI command handlers.

mod classify_stage;
mod load;
mod output;
mod report_stage;

pub use classify_stage::{classify_files, ClassifiedPair};
pub use load::{load_catalog, load_snapshot};
pub use output::{should_use_color, write_output, OutputTarget};
pub use report_stage::output_report;

use crate::diff::ClassificationResult;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// No changes detected, or a bump was committed
    pub const SUCCESS: i32 = 0;
    /// Changes were detected
    pub const CHANGES_DETECTED: i32 = 1;
    /// A safety-floor change was detected
    pub const SAFETY_FLOOR: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Exit code describing a classification outcome.
#[must_use]
pub const fn exit_code_for(result: &ClassificationResult) -> i32 {
    if result.has_safety_floor {
        exit_codes::SAFETY_FLOOR
    } else if result.has_changes {
        exit_codes::CHANGES_DETECTED
    } else {
        exit_codes::SUCCESS
    }
}
