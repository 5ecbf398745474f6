//! Recipe snapshot data structures.

use super::{AttributeSet, AuditEntry, Version};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use xxhash_rust::xxh3::xxh3_64;

/// Immutable, fully-materialized view of a recipe at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Display name of the recipe
    #[serde(default)]
    pub name: String,
    /// Cached safety attributes as last resolved by the editor
    #[serde(default)]
    pub safety_attributes: SafetyAttributes,
    /// Composition list; required, a snapshot without one is malformed
    pub components: Vec<ComponentEntry>,
    #[serde(default)]
    pub yield_amount: f64,
    #[serde(default)]
    pub yield_unit: String,
    #[serde(default)]
    pub method_steps: Vec<MethodStep>,
    #[serde(default)]
    pub free_text: FreeText,
    pub version: Version,
    #[serde(default)]
    pub status: Status,
    /// Append-only, oldest first
    #[serde(default)]
    pub audit_history: Vec<AuditEntry>,
}

impl Snapshot {
    /// Create an empty draft snapshot at the given version.
    #[must_use]
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            safety_attributes: SafetyAttributes::default(),
            components: Vec::new(),
            yield_amount: 0.0,
            yield_unit: String::new(),
            method_steps: Vec::new(),
            free_text: FreeText::default(),
            version,
            status: Status::Draft,
            audit_history: Vec::new(),
        }
    }

    /// Structural problems that make this snapshot unfit for classification.
    ///
    /// An empty list means the snapshot is well-formed.
    #[must_use]
    pub fn structural_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let mut seen = HashSet::new();
        for (index, component) in self.components.iter().enumerate() {
            if component.id.trim().is_empty() {
                problems.push(format!("component #{index} has an empty id"));
            } else if !seen.insert(component.id.as_str()) {
                problems.push(format!("duplicate component id '{}'", component.id));
            }
            if component.reference.as_deref().is_some_and(|r| r.trim().is_empty()) {
                problems.push(format!("component '{}' has an empty reference", component.id));
            }
        }

        if !self.yield_amount.is_finite() || self.yield_amount < 0.0 {
            problems.push(format!(
                "yield amount must be a finite non-negative number, got {}",
                self.yield_amount
            ));
        }

        for (index, step) in self.method_steps.iter().enumerate() {
            if step.instruction.trim().is_empty() {
                problems.push(format!("method step #{} has no instruction", index + 1));
            }
            if let Some(temperature) = step.temperature {
                if !temperature.value.is_finite() {
                    problems.push(format!(
                        "method step #{} has a non-finite temperature",
                        index + 1
                    ));
                }
            }
        }

        problems
    }

    /// Fail with a malformed-snapshot error naming `role` if any structural
    /// problem exists.
    pub fn validate(&self, role: &str) -> crate::error::Result<()> {
        let problems = self.structural_problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(crate::error::RevisionError::malformed_snapshot(
                role,
                problems.join("; "),
            ))
        }
    }

    /// Resolve any `present`/`possible` overlap in place, in favor of `present`.
    pub fn normalize(&mut self) {
        self.safety_attributes = self.safety_attributes.normalized();
    }

    /// Hash of every field the classifier compares.
    ///
    /// Version, status and audit history are excluded. Returns 0 if the
    /// snapshot could not be serialized, which callers treat as "unknown".
    #[must_use]
    pub fn classification_fingerprint(&self) -> u64 {
        let view = ClassificationView {
            safety_attributes: self.safety_attributes.normalized(),
            components: &self.components,
            yield_amount: self.yield_amount,
            yield_unit: &self.yield_unit,
            method_steps: &self.method_steps,
            free_text: &self.free_text,
        };
        serde_json::to_vec(&view).map_or(0, |bytes| xxh3_64(&bytes))
    }
}

#[derive(Serialize)]
struct ClassificationView<'a> {
    safety_attributes: SafetyAttributes,
    components: &'a [ComponentEntry],
    yield_amount: f64,
    yield_unit: &'a str,
    method_steps: &'a [MethodStep],
    free_text: &'a FreeText,
}

/// The derived safety-attribute set of a recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyAttributes {
    /// Definitely contained
    #[serde(default)]
    pub present: AttributeSet,
    /// Supplier or supply-chain risk
    #[serde(default)]
    pub possible: AttributeSet,
    /// Free-text environmental cross-contact notes
    #[serde(default)]
    pub cross_contact: Vec<String>,
}

impl SafetyAttributes {
    /// Copy with every `present` id removed from `possible`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            present: self.present.clone(),
            possible: self.possible.difference(&self.present).cloned().collect(),
            cross_contact: self.cross_contact.clone(),
        }
    }
}

/// How a component refers to its source of attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    /// A catalog ingredient or sub-item
    DirectReference,
    /// Another versioned recipe
    NestedDocumentReference,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectReference => write!(f, "ingredient"),
            Self::NestedDocumentReference => write!(f, "sub-recipe"),
        }
    }
}

/// One entry in a recipe's composition list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEntry {
    /// Stable identity, unchanged by renames
    pub id: String,
    pub kind: ComponentKind,
    #[serde(default)]
    pub name: String,
    /// Catalog item or nested document id; defaults to `id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ComponentEntry {
    /// Create a catalog ingredient entry whose reference is its id.
    pub fn ingredient(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ComponentKind::DirectReference,
            name: name.into(),
            reference: None,
        }
    }

    /// Create a nested-recipe entry whose reference is its id.
    pub fn sub_recipe(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ComponentKind::NestedDocumentReference,
            name: name.into(),
            reference: None,
        }
    }

    /// Point this entry at a different catalog item or document.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Key passed to the catalog or nested-document lookup.
    #[must_use]
    pub fn lookup_key(&self) -> &str {
        self.reference.as_deref().unwrap_or(&self.id)
    }

    /// Name for display, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Temperature scale for method steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

/// Structured step temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub value: f64,
    pub unit: TemperatureUnit,
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        };
        write!(f, "{}°{unit}", self.value)
    }
}

/// One step of the method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodStep {
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl MethodStep {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            temperature: None,
            duration_minutes: None,
        }
    }
}

/// Narrative fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_notes: Option<String>,
}

/// Workflow state of a recipe.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Draft,
    Review,
    Approved,
    Archived,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Review => write!(f, "review"),
            Self::Approved => write!(f, "approved"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Allergen, AttributeId};

    fn sample() -> Snapshot {
        let mut snapshot = Snapshot::new("Brown bread", Version::new(1, 0, 0));
        snapshot.components.push(ComponentEntry::ingredient("flour", "Wholemeal flour"));
        snapshot.yield_amount = 2.0;
        snapshot.yield_unit = "loaves".to_string();
        snapshot.method_steps.push(MethodStep::new("Mix"));
        snapshot
    }

    #[test]
    fn test_well_formed_snapshot_has_no_problems() {
        assert!(sample().structural_problems().is_empty());
    }

    #[test]
    fn test_structural_problems_detected() {
        let mut snapshot = sample();
        snapshot.components.push(ComponentEntry::ingredient("flour", "Again"));
        snapshot.components.push(ComponentEntry::ingredient(" ", "Blank"));
        snapshot.yield_amount = f64::NAN;
        snapshot.method_steps.push(MethodStep::new(""));

        let problems = snapshot.structural_problems();
        assert_eq!(problems.len(), 4, "{problems:?}");
        assert!(problems.iter().any(|p| p.contains("duplicate component id 'flour'")));
    }

    #[test]
    fn test_normalized_prefers_present() {
        let milk = AttributeId::from(Allergen::Milk);
        let attrs = SafetyAttributes {
            present: [milk.clone()].into_iter().collect(),
            possible: [milk.clone(), Allergen::Sesame.into()].into_iter().collect(),
            cross_contact: Vec::new(),
        };
        let normalized = attrs.normalized();
        assert!(normalized.present.contains(&milk));
        assert!(!normalized.possible.contains(&milk));
        assert_eq!(normalized.possible.len(), 1);
    }

    #[test]
    fn test_fingerprint_ignores_version_and_status() {
        let a = sample();
        let mut b = sample();
        b.version = Version::new(9, 9, 9);
        b.status = Status::Approved;
        assert_eq!(a.classification_fingerprint(), b.classification_fingerprint());

        b.yield_amount = 3.0;
        assert_ne!(a.classification_fingerprint(), b.classification_fingerprint());
    }

    #[test]
    fn test_missing_components_fails_to_deserialize() {
        let json = r#"{"name": "x", "version": "1.0.0"}"#;
        assert!(serde_json::from_str::<Snapshot>(json).is_err());
    }

    #[test]
    fn test_lookup_key_defaults_to_id() {
        let plain = ComponentEntry::ingredient("egg-1", "Egg");
        assert_eq!(plain.lookup_key(), "egg-1");
        let pointed = plain.with_reference("cat-42");
        assert_eq!(pointed.lookup_key(), "cat-42");
    }
}
