//! Set and scalar comparison helpers.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How set members are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Trimmed, case-insensitive; for natural-language identifiers
    NaturalLanguage,
    /// Byte-exact; for opaque ids
    Exact,
}

impl MatchMode {
    fn key(self, value: &str) -> String {
        match self {
            Self::NaturalLanguage => value.trim().to_lowercase(),
            Self::Exact => value.to_string(),
        }
    }
}

/// Members added to and removed from a set, each sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDiff<T = String> {
    pub added: Vec<T>,
    pub removed: Vec<T>,
}

impl<T> SetDiff<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compare two string collections.
///
/// Reported members keep the spelling they had in their own collection
/// (trimmed when matching naturally). When several spellings collapse to the
/// same key, the lexicographically smallest is reported.
pub fn diff_sets<'a, C, P>(current: C, previous: P, mode: MatchMode) -> SetDiff
where
    C: IntoIterator<Item = &'a String>,
    P: IntoIterator<Item = &'a String>,
{
    let current = keyed(current, mode);
    let previous = keyed(previous, mode);

    SetDiff {
        added: current
            .iter()
            .filter(|(key, _)| !previous.contains_key(*key))
            .map(|(_, value)| value.clone())
            .collect(),
        removed: previous
            .iter()
            .filter(|(key, _)| !current.contains_key(*key))
            .map(|(_, value)| value.clone())
            .collect(),
    }
}

/// Compare two ordered sets of already-normalized values exactly.
#[must_use]
pub fn diff_ordered_sets<T: Ord + Clone>(
    current: &BTreeSet<T>,
    previous: &BTreeSet<T>,
) -> SetDiff<T> {
    SetDiff {
        added: current.difference(previous).cloned().collect(),
        removed: previous.difference(current).cloned().collect(),
    }
}

/// Whether two optional text fields differ, ignoring surrounding whitespace.
///
/// A missing field and a blank one are the same.
#[must_use]
pub fn text_changed(previous: Option<&str>, current: Option<&str>) -> bool {
    fn normalize(text: Option<&str>) -> Option<&str> {
        text.map(str::trim).filter(|t| !t.is_empty())
    }
    normalize(previous) != normalize(current)
}

fn keyed<'a>(
    values: impl IntoIterator<Item = &'a String>,
    mode: MatchMode,
) -> BTreeMap<String, String> {
    let mut keyed: BTreeMap<String, String> = BTreeMap::new();
    for value in values {
        let key = mode.key(value);
        if mode == MatchMode::NaturalLanguage && key.is_empty() {
            continue;
        }
        let display = match mode {
            MatchMode::NaturalLanguage => value.trim().to_string(),
            MatchMode::Exact => value.clone(),
        };
        keyed
            .entry(key)
            .and_modify(|existing| {
                if display < *existing {
                    existing.clone_from(&display);
                }
            })
            .or_insert(display);
    }
    keyed
}
