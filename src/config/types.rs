//! Configuration types for recipe-revision.

use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loadable from a YAML file and overridable from
/// the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Classifier behavior
    pub classifier: ClassifierConfig,
    /// Version bump defaults
    pub bump: BumpConfig,
    /// Output configuration (format, file)
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the component count at which lookups run in parallel.
    pub const fn parallel_resolution_threshold(mut self, threshold: usize) -> Self {
        self.config.classifier.parallel_resolution_threshold = threshold;
        self
    }

    /// Enable or disable dangling-reference advisories.
    pub const fn report_dangling_references(mut self, report: bool) -> Self {
        self.config.classifier.report_dangling_references = report;
        self
    }

    /// Set the author used when none is given on the command line.
    pub fn default_author(mut self, author: impl Into<String>) -> Self {
        self.config.bump.default_author = Some(author.into());
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section types
// ============================================================================

/// Classifier settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Component count at which catalog lookups run in parallel
    pub parallel_resolution_threshold: usize,
    /// Report unresolvable component references as advisory changes
    pub report_dangling_references: bool,
}

/// Version bump settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BumpConfig {
    /// Author recorded in audit entries when none is supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_author: Option<String>,
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format
    pub format: ReportFormat,
    /// Output file path (stdout if not specified)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}
