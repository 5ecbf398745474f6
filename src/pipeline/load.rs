//! Snapshot and catalog loading.

use crate::error::{ParseErrorKind, Result, RevisionError};
use crate::model::{InMemoryCatalog, Snapshot};
use std::path::Path;

/// Read a snapshot document from a JSON file.
///
/// Unreadable JSON, including a missing `components` field, is reported as a
/// malformed snapshot.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    tracing::debug!("Loading snapshot: {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| RevisionError::io(path, e))?;
    let snapshot: Snapshot = serde_json::from_str(&content)
        .map_err(|e| RevisionError::malformed_snapshot(path.display().to_string(), e.to_string()))?;
    tracing::debug!(
        components = snapshot.components.len(),
        "Loaded snapshot '{}' at {}",
        snapshot.name,
        snapshot.version
    );
    Ok(snapshot)
}

/// Read a catalog table from a JSON file.
///
/// Layout: `{ "items": { ref: CatalogAttributes }, "documents": { id: [attribute] } }`.
pub fn load_catalog(path: &Path) -> Result<InMemoryCatalog> {
    let content = std::fs::read_to_string(path).map_err(|e| RevisionError::io(path, e))?;
    let catalog: InMemoryCatalog = serde_json::from_str(&content).map_err(|e| {
        RevisionError::parse(
            format!("catalog {}", path.display()),
            ParseErrorKind::InvalidJson(e.to_string()),
        )
    })?;
    tracing::debug!(
        items = catalog.items.len(),
        documents = catalog.documents.len(),
        "Loaded catalog"
    );
    Ok(catalog)
}
