//! Unified error types for recipe-revision.
//!
//! Classification and version bumps fail independently: a rejected bump
//! never invalidates the classification it was checked against.

use crate::model::{Tier, Version};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for recipe-revision operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RevisionError {
    /// Classification could not run; no partial result exists
    #[error("Classification failed: {context}")]
    Classification {
        context: String,
        #[source]
        source: ClassificationErrorKind,
    },

    /// A version bump was rejected
    #[error("Version bump rejected: {context}")]
    Bump {
        context: String,
        #[source]
        source: BumpErrorKind,
    },

    /// Errors reading snapshot or catalog documents
    #[error("Failed to parse document: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Reasons classification is aborted.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClassificationErrorKind {
    #[error("Malformed {snapshot} snapshot: {reason}")]
    MalformedSnapshot { snapshot: String, reason: String },
}

/// Reasons a version transition is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BumpErrorKind {
    #[error("Invalid version transition: chosen tier {chosen} is below the required minimum {minimum}")]
    TierBelowMinimum { chosen: Tier, minimum: Tier },

    #[error("Invalid version transition: a major bump requires notes")]
    MissingMajorNotes,

    #[error("Invalid version transition: {tier} bump of {version} overflows")]
    VersionOverflow { version: Version, tier: Tier },
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for recipe-revision operations
pub type Result<T> = std::result::Result<T, RevisionError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl RevisionError {
    /// Create a malformed-snapshot error. `snapshot` names which side failed.
    pub fn malformed_snapshot(snapshot: impl Into<String>, reason: impl Into<String>) -> Self {
        let snapshot = snapshot.into();
        Self::Classification {
            context: format!("validating {snapshot} snapshot"),
            source: ClassificationErrorKind::MalformedSnapshot {
                snapshot,
                reason: reason.into(),
            },
        }
    }

    /// Create an invalid-version-transition error
    pub fn invalid_transition(source: BumpErrorKind) -> Self {
        Self::Bump {
            context: "checking version transition".to_string(),
            source,
        }
    }

    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::parse(
            "missing required field",
            ParseErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this is a malformed-snapshot classification failure
    #[must_use]
    pub const fn is_malformed_snapshot(&self) -> bool {
        matches!(
            self,
            Self::Classification {
                source: ClassificationErrorKind::MalformedSnapshot { .. },
                ..
            }
        )
    }

    /// Whether this is a rejected version transition
    #[must_use]
    pub const fn is_invalid_version_transition(&self) -> bool {
        matches!(self, Self::Bump { .. })
    }

    /// The bump rejection reason, if this is one
    #[must_use]
    pub const fn bump_kind(&self) -> Option<&BumpErrorKind> {
        match self {
            Self::Bump { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for RevisionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for RevisionError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained outermost first:
/// `"loading previous: reading file: <original>"`.
///
/// # Example
///
/// ```ignore
/// use recipe_revision::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<Snapshot> {
///     let content = std::fs::read_to_string(path).context("reading snapshot file")?;
///     serde_json::from_str(&content)
///         .with_context(|| format!("parsing snapshot from {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<RevisionError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: RevisionError, new_ctx: &str) -> RevisionError {
    match err {
        RevisionError::Classification {
            context: existing,
            source,
        } => RevisionError::Classification {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RevisionError::Bump {
            context: existing,
            source,
        } => RevisionError::Bump {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RevisionError::Parse {
            context: existing,
            source,
        } => RevisionError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RevisionError::Io {
            path,
            message,
            source,
        } => RevisionError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        RevisionError::Config(msg) => RevisionError::Config(chain_context(new_ctx, &msg)),
        RevisionError::Validation(msg) => RevisionError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| RevisionError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| RevisionError::Validation(f().into()))
    }
}
