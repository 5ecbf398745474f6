//! Classification stage over snapshot files.

use super::{load_catalog, load_snapshot};
use crate::config::ClassifierConfig;
use crate::diff::{ChangeClassifier, ClassificationResult};
use crate::error::{ErrorContext, Result};
use crate::model::{InMemoryCatalog, Snapshot};
use std::path::Path;

/// Both loaded snapshots together with their classification.
#[derive(Debug, Clone)]
pub struct ClassifiedPair {
    pub previous: Snapshot,
    pub current: Snapshot,
    pub result: ClassificationResult,
}

/// Load two snapshot files and classify the change between them.
///
/// Without a catalog file every component reference is dangling, which only
/// produces advisory changes.
pub fn classify_files(
    previous_path: &Path,
    current_path: &Path,
    catalog_path: Option<&Path>,
    config: &ClassifierConfig,
) -> Result<ClassifiedPair> {
    let previous = load_snapshot(previous_path).context("loading previous snapshot")?;
    let current = load_snapshot(current_path).context("loading current snapshot")?;
    let catalog = match catalog_path {
        Some(path) => load_catalog(path)?,
        None => {
            tracing::warn!("No catalog given, component references will not resolve");
            InMemoryCatalog::new()
        }
    };

    let result = ChangeClassifier::new()
        .with_config(config.clone())
        .classify(&previous, &current, &catalog, &catalog)?;

    Ok(ClassifiedPair {
        previous,
        current,
        result,
    })
}
