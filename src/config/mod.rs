//! Configuration module for recipe-revision.
//!
//! Provides:
//! - Type-safe configuration structures
//! - Validation of configuration values
//! - YAML config file loading and discovery
//! - Merging of command-line overrides
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use recipe_revision::config::{load_or_default, AppConfig};
//!
//! let config = AppConfig::builder()
//!     .parallel_resolution_threshold(32)
//!     .default_author("pastry-team")
//!     .build();
//!
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.recipe-revision.yaml` file in your project root or
//! `~/.config/recipe-revision/`:
//!
//! ```yaml
//! classifier:
//!   parallel_resolution_threshold: 64
//!   report_dangling_references: true
//! bump:
//!   default_author: pastry-team
//! output:
//!   format: summary
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::DEFAULT_PARALLEL_RESOLUTION_THRESHOLD;
pub use types::{AppConfig, AppConfigBuilder, BumpConfig, ClassifierConfig, OutputConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema describing the configuration file format.
///
/// Editors can use it for validation and autocompletion of
/// `.recipe-revision.yaml` files.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
