//! JSON report generator.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangeCategory, ClassificationResult};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, result: &ClassificationResult) -> Result<String, ReportError> {
        let report = JsonRevisionReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME"),
                    version: env!("CARGO_PKG_VERSION"),
                },
                generated_at: Utc::now().to_rfc3339(),
            },
            category_counts: result
                .category_counts()
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
            classification: result,
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        rendered.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[derive(Serialize)]
struct JsonRevisionReport<'a> {
    metadata: JsonReportMetadata,
    classification: &'a ClassificationResult,
    category_counts: Vec<CategoryCount>,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct CategoryCount {
    category: ChangeCategory,
    count: usize,
}
