//! Report generation for classification results.
//!
//! - Summary: compact human-readable output for terminals
//! - JSON: structured data for programmatic integration

mod json;
mod summary;

pub use json::JsonReporter;
pub use summary::SummaryReporter;

use crate::diff::ClassificationResult;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Write;
use thiserror::Error;

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Brief human-readable summary
    #[default]
    Summary,
    /// Structured JSON output
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render a classification result
    fn generate(&self, result: &ClassificationResult) -> Result<String, ReportError>;

    /// Write the rendered report to a writer
    fn write_report(
        &self,
        result: &ClassificationResult,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate(result)?;
        writer.write_all(report.as_bytes())?;
        if !report.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat, use_color: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary if use_color => Box::new(SummaryReporter::new()),
        ReportFormat::Summary => Box::new(SummaryReporter::new().no_color()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
