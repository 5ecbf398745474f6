//! Document version numbers and audit history records.

use super::Tier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-part document version, ordered as the tuple `(major, minor, patch)`.
///
/// Serialized as `"<major>.<minor>.<patch>"`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Compute the successor for a tier, or `None` on overflow.
    #[must_use]
    pub fn bumped(self, tier: Tier) -> Option<Self> {
        match tier {
            Tier::Major => Some(Self::new(self.major.checked_add(1)?, 0, 0)),
            Tier::Minor => Some(Self::new(self.major, self.minor.checked_add(1)?, 0)),
            Tier::Patch => Some(Self::new(self.major, self.minor, self.patch.checked_add(1)?)),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Error returned for version strings that are not plain `X.Y.Z`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid document version '{input}': {reason}")]
pub struct VersionParseError {
    pub input: String,
    pub reason: String,
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = semver::Version::parse(s.trim()).map_err(|e| VersionParseError {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(VersionParseError {
                input: s.to_string(),
                reason: "pre-release and build metadata are not allowed".to_string(),
            });
        }
        Ok(Self::new(parsed.major, parsed.minor, parsed.patch))
    }
}

impl TryFrom<String> for Version {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

/// One entry in a document's append-only audit history.
///
/// `version` is the version that was current *until* this entry was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub version: Version,
    /// RFC 3339 timestamp (UTC)
    pub timestamp: DateTime<Utc>,
    pub author: String,
    pub notes: String,
    pub tier: Tier,
}
