//! Default configuration values.

use super::types::ClassifierConfig;
use crate::diff::resolver::DEFAULT_PARALLEL_THRESHOLD;

/// Default component count at which lookups are parallelized.
pub const DEFAULT_PARALLEL_RESOLUTION_THRESHOLD: usize = DEFAULT_PARALLEL_THRESHOLD;

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            parallel_resolution_threshold: DEFAULT_PARALLEL_RESOLUTION_THRESHOLD,
            report_dangling_references: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_classifier_defaults() {
        let config = AppConfig::default();
        assert_eq!(
            config.classifier.parallel_resolution_threshold,
            DEFAULT_PARALLEL_RESOLUTION_THRESHOLD
        );
        assert!(config.classifier.report_dangling_references);
        assert!(config.bump.default_author.is_none());
        assert!(config.output.file.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = AppConfig::builder()
            .parallel_resolution_threshold(8)
            .report_dangling_references(false)
            .default_author("chef-ana")
            .build();
        assert_eq!(config.classifier.parallel_resolution_threshold, 8);
        assert!(!config.classifier.report_dangling_references);
        assert_eq!(config.bump.default_author.as_deref(), Some("chef-ana"));
    }
}
