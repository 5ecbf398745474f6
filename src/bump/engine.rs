//! Version bump engine implementation.

use crate::diff::ClassificationResult;
use crate::error::{BumpErrorKind, Result, RevisionError};
use crate::model::{AuditEntry, Snapshot, Status, Tier, Version};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An operator's request to commit a revision.
///
/// The floor can only come from a [`ClassificationResult`], so a request
/// cannot claim a lower minimum than its classification demands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BumpRequest {
    chosen_tier: Tier,
    minimum_tier: Tier,
    notes: String,
    author: String,
}

impl BumpRequest {
    /// Build a request constrained by a classification result.
    #[must_use]
    pub fn for_classification(
        classification: &ClassificationResult,
        chosen_tier: Tier,
        notes: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            chosen_tier,
            minimum_tier: classification.minimum_tier,
            notes: notes.into(),
            author: author.into(),
        }
    }

    #[must_use]
    pub const fn chosen_tier(&self) -> Tier {
        self.chosen_tier
    }

    /// Floor from classification; the chosen tier may not be lower
    #[must_use]
    pub const fn minimum_tier(&self) -> Tier {
        self.minimum_tier
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }
}

/// Outcome of an accepted bump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionBumpResult {
    pub new_version: Version,
    /// Archives the version that was current before this bump
    pub new_audit_entry: AuditEntry,
    /// `Some(Draft)` for minor and major bumps, forcing re-review
    pub status_override: Option<Status>,
}

/// Computes and applies version transitions.
///
/// Not idempotent: every accepted call is a distinct commit.
pub struct VersionBumpEngine {
    clock: fn() -> DateTime<Utc>,
}

impl VersionBumpEngine {
    /// Create an engine stamping audit entries with the current UTC time
    pub fn new() -> Self {
        Self { clock: Utc::now }
    }

    /// Use a different clock for audit timestamps
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Compute the transition from `current_version` without applying it.
    ///
    /// Rejects a tier below the request's minimum, a major bump with blank
    /// notes, and any bump that would overflow a version component.
    pub fn bump(&self, current_version: Version, request: &BumpRequest) -> Result<VersionBumpResult> {
        if request.chosen_tier < request.minimum_tier {
            tracing::warn!(
                chosen = %request.chosen_tier,
                minimum = %request.minimum_tier,
                "Rejected bump below safety floor"
            );
            return Err(RevisionError::invalid_transition(
                BumpErrorKind::TierBelowMinimum {
                    chosen: request.chosen_tier,
                    minimum: request.minimum_tier,
                },
            ));
        }
        if request.chosen_tier == Tier::Major && request.notes.trim().is_empty() {
            return Err(RevisionError::invalid_transition(
                BumpErrorKind::MissingMajorNotes,
            ));
        }

        let new_version = current_version.bumped(request.chosen_tier).ok_or_else(|| {
            RevisionError::invalid_transition(BumpErrorKind::VersionOverflow {
                version: current_version,
                tier: request.chosen_tier,
            })
        })?;

        let new_audit_entry = AuditEntry {
            version: current_version,
            timestamp: (self.clock)(),
            author: request.author.clone(),
            notes: request.notes.clone(),
            tier: request.chosen_tier,
        };
        let status_override = (request.chosen_tier != Tier::Patch).then_some(Status::Draft);

        Ok(VersionBumpResult {
            new_version,
            new_audit_entry,
            status_override,
        })
    }

    /// Bump `document` in place: append the audit entry, advance the version
    /// and apply any status override. The document is untouched on rejection.
    pub fn commit(&self, document: &mut Snapshot, request: &BumpRequest) -> Result<VersionBumpResult> {
        let result = self.bump(document.version, request)?;

        document.audit_history.push(result.new_audit_entry.clone());
        document.version = result.new_version;
        if let Some(status) = result.status_override {
            document.status = status;
        }

        tracing::info!(
            from = %result.new_audit_entry.version,
            to = %result.new_version,
            tier = %request.chosen_tier,
            "Committed {} revision",
            request.chosen_tier
        );
        Ok(result)
    }
}

impl Default for VersionBumpEngine {
    fn default() -> Self {
        Self::new()
    }
}
