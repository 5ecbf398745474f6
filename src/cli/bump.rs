//! Bump command handler.

use super::RevisionPaths;
use crate::bump::{BumpRequest, VersionBumpEngine};
use crate::config::AppConfig;
use crate::error::BumpErrorKind;
use crate::model::Tier;
use crate::pipeline::{classify_files, exit_codes, write_output, OutputTarget};
use anyhow::{Context, Result};

/// Inputs of the `bump` subcommand.
#[derive(Debug, Clone)]
pub struct BumpCommand {
    pub paths: RevisionPaths,
    pub tier: Tier,
    pub notes: Option<String>,
    /// Falls back to `bump.default_author` from the config
    pub author: Option<String>,
    pub config: AppConfig,
    pub quiet: bool,
}

/// Classify the revision, enforce its safety floor and write the committed
/// current snapshot as JSON.
///
/// A tier below the safety floor is reported and yields
/// [`exit_codes::SAFETY_FLOOR`]; nothing is written in that case.
pub fn run_bump(command: &BumpCommand) -> Result<i32> {
    let paths = &command.paths;
    let classified = classify_files(
        &paths.previous,
        &paths.current,
        paths.catalog.as_deref(),
        &command.config.classifier,
    )
    .context("Failed to classify revision")?;

    let author = command
        .author
        .clone()
        .or_else(|| command.config.bump.default_author.clone())
        .context("No author given; pass --author or set bump.default_author")?;

    let result = &classified.result;
    if !command.quiet {
        tracing::info!(
            "Suggested tier {} (minimum {}): {}",
            result.suggested_tier,
            result.minimum_tier,
            result.rationale
        );
    }

    let request = BumpRequest::for_classification(
        result,
        command.tier,
        command.notes.clone().unwrap_or_default(),
        author,
    );
    // Version and audit trail are owned by the saved snapshot
    let mut document = classified.current;
    if document.version != classified.previous.version {
        tracing::warn!(
            "Ignoring version {} in current snapshot; bumping from saved version {}",
            document.version,
            classified.previous.version
        );
    }
    document.version = classified.previous.version;
    document.audit_history = classified.previous.audit_history;
    if let Err(err) = VersionBumpEngine::new().commit(&mut document, &request) {
        if let Some(kind @ BumpErrorKind::TierBelowMinimum { .. }) = err.bump_kind() {
            for change in result.floor_changes() {
                tracing::error!("{}: {}", change.description, change.reason);
            }
            tracing::error!("{kind}");
            return Ok(exit_codes::SAFETY_FLOOR);
        }
        return Err(err).context("Failed to bump version");
    }

    let rendered = serde_json::to_string_pretty(&document)?;
    let target = OutputTarget::from_option(command.config.output.file.clone());
    write_output(&rendered, &target, command.quiet)?;
    Ok(exit_codes::SUCCESS)
}
