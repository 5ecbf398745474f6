//! Configuration validation for recipe-revision.

use super::types::{AppConfig, BumpConfig, ClassifierConfig, OutputConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// A single invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Dotted path of the offending field
    pub field: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning every problem found.
    fn validate(&self) -> Vec<ConfigError>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.classifier.validate();
        errors.extend(self.bump.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for ClassifierConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.parallel_resolution_threshold == 0 {
            errors.push(ConfigError::new(
                "classifier.parallel_resolution_threshold",
                "Parallel resolution threshold must be at least 1",
            ));
        }
        errors
    }
}

impl Validatable for BumpConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(author) = &self.default_author {
            if author.trim().is_empty() {
                errors.push(ConfigError::new(
                    "bump.default_author",
                    "Default author must not be blank when set",
                ));
            }
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(parent) = self.file.as_deref().and_then(std::path::Path::parent) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = ClassifierConfig {
            parallel_resolution_threshold: 0,
            ..ClassifierConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "classifier.parallel_resolution_threshold");
    }

    #[test]
    fn test_blank_author_rejected() {
        let config = BumpConfig {
            default_author: Some("  ".to_string()),
        };
        assert!(!config.is_valid());

        let config = BumpConfig {
            default_author: Some("chef-ana".to_string()),
        };
        assert!(config.is_valid());
    }

    #[test]
    fn test_output_file_parent_must_exist() {
        let config = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/report.json")),
            ..OutputConfig::default()
        };
        assert!(!config.is_valid());

        let config = OutputConfig {
            file: Some(PathBuf::from("report.json")),
            ..OutputConfig::default()
        };
        assert!(config.is_valid());
    }

    #[test]
    fn test_app_config_collects_all_errors() {
        let config = AppConfig::builder()
            .parallel_resolution_threshold(0)
            .default_author("")
            .build();
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::new("bump.default_author", "bad");
        assert_eq!(error.to_string(), "bump.default_author: bad");
    }
}
