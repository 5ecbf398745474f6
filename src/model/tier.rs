//! Change tiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much human communication a change requires.
///
/// Ordering follows rank: `Patch < Minor < Major`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Silent change
    #[default]
    Patch,
    /// Broadcast for review
    Minor,
    /// Mandatory acknowledgment
    Major,
}

impl Tier {
    /// Numeric rank (`patch=0`, `minor=1`, `major=2`).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Patch => 0,
            Self::Minor => 1,
            Self::Major => 2,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "patch" => Ok(Self::Patch),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            other => Err(format!("unknown tier '{other}' (expected patch, minor or major)")),
        }
    }
}
