//! Report output stage.

use super::{should_use_color, write_output, OutputTarget};
use crate::config::OutputConfig;
use crate::diff::ClassificationResult;
use crate::reports::create_reporter;
use anyhow::Result;

/// Render a classification report and write it to the configured destination.
pub fn output_report(config: &OutputConfig, result: &ClassificationResult, quiet: bool) -> Result<()> {
    let target = OutputTarget::from_option(config.file.clone());
    let reporter = create_reporter(config.format, should_use_color(&target));
    let report = reporter.generate(result)?;
    write_output(&report, &target, quiet)
}
