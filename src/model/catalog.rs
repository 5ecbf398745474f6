//! Component catalog attributes and lookup capabilities.
//!
//! The catalog itself lives outside this crate. Callers inject lookups through
//! [`CatalogLookup`] and [`NestedLookup`]; both are implemented for plain
//! closures and for [`InMemoryCatalog`].

use super::{Allergen, AttributeId, AttributeSet};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Maximum number of operator-defined attributes per catalog item.
pub const MAX_CUSTOM_ATTRIBUTES: usize = 3;

/// How strongly a catalog item carries an attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeLevel {
    #[default]
    None,
    MayContain,
    Contains,
}

impl AttributeLevel {
    const fn rank(self) -> u8 {
        match self {
            Self::None => 0,
            Self::MayContain => 1,
            Self::Contains => 2,
        }
    }
}

/// An operator-defined attribute slot on a catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAttributeSlot {
    pub label: String,
    #[serde(default)]
    pub level: AttributeLevel,
}

impl CustomAttributeSlot {
    /// Identifier named by the label, `None` for a blank label.
    ///
    /// Labels naming a standard allergen ("Peanut") resolve to it.
    #[must_use]
    pub fn attribute_id(&self) -> Option<AttributeId> {
        self.label.parse().ok()
    }
}

/// Attribute flags of one catalog item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogAttributes {
    /// Standard allergen levels; absent entries mean [`AttributeLevel::None`]
    #[serde(default)]
    pub standard: IndexMap<Allergen, AttributeLevel>,
    #[serde(default)]
    pub custom: [Option<CustomAttributeSlot>; MAX_CUSTOM_ATTRIBUTES],
}

impl CatalogAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level of a standard allergen.
    #[must_use]
    pub fn with(mut self, allergen: Allergen, level: AttributeLevel) -> Self {
        self.standard.insert(allergen, level);
        self
    }

    /// Mark a standard allergen as definitely contained.
    #[must_use]
    pub fn containing(self, allergen: Allergen) -> Self {
        self.with(allergen, AttributeLevel::Contains)
    }

    /// Fill a custom slot (0-based, below [`MAX_CUSTOM_ATTRIBUTES`]).
    ///
    /// Out-of-range slots are ignored.
    #[must_use]
    pub fn with_custom(
        mut self,
        slot: usize,
        label: impl Into<String>,
        level: AttributeLevel,
    ) -> Self {
        if let Some(entry) = self.custom.get_mut(slot) {
            *entry = Some(CustomAttributeSlot {
                label: label.into(),
                level,
            });
        }
        self
    }

    /// Level of a given attribute on this item.
    ///
    /// A custom slot naming a standard allergen counts towards that allergen;
    /// the strongest level wins.
    #[must_use]
    pub fn level_of(&self, id: &AttributeId) -> AttributeLevel {
        let standard = match id {
            AttributeId::Standard(allergen) => self.standard.get(allergen).copied(),
            AttributeId::Custom(_) => None,
        };
        self.custom
            .iter()
            .flatten()
            .filter(|slot| slot.attribute_id().as_ref() == Some(id))
            .map(|slot| slot.level)
            .chain(standard)
            .max_by_key(|level| level.rank())
            .unwrap_or_default()
    }

    /// Every attribute whose effective level is `level`.
    #[must_use]
    pub fn attributes_at(&self, level: AttributeLevel) -> AttributeSet {
        let standard = self.standard.keys().map(|allergen| AttributeId::Standard(*allergen));
        let custom = self
            .custom
            .iter()
            .flatten()
            .filter_map(CustomAttributeSlot::attribute_id);
        standard
            .chain(custom)
            .filter(|id| self.level_of(id) == level)
            .collect()
    }

    /// Attributes this item definitely contains.
    #[must_use]
    pub fn present(&self) -> AttributeSet {
        self.attributes_at(AttributeLevel::Contains)
    }
}

/// Resolves a catalog item reference to its attributes.
pub trait CatalogLookup: Sync {
    /// Return `None` when the item does not exist.
    fn catalog_attributes(&self, reference: &str) -> Option<CatalogAttributes>;
}

/// Resolves a nested document reference to its already-resolved present set.
pub trait NestedLookup: Sync {
    /// Return `None` when the document does not exist.
    fn resolved_present(&self, document_id: &str) -> Option<AttributeSet>;
}

impl<F> CatalogLookup for F
where
    F: Fn(&str) -> Option<CatalogAttributes> + Sync,
{
    fn catalog_attributes(&self, reference: &str) -> Option<CatalogAttributes> {
        self(reference)
    }
}

impl<F> NestedLookup for F
where
    F: Fn(&str) -> Option<AttributeSet> + Sync,
{
    fn resolved_present(&self, document_id: &str) -> Option<AttributeSet> {
        self(document_id)
    }
}

/// Table-backed catalog, used by the CLI and in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    /// Catalog items by reference
    #[serde(default)]
    pub items: IndexMap<String, CatalogAttributes>,
    /// Resolved present sets of nested documents by id
    #[serde(default)]
    pub documents: IndexMap<String, AttributeSet>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_item(mut self, reference: impl Into<String>, attrs: CatalogAttributes) -> Self {
        self.items.insert(reference.into(), attrs);
        self
    }

    #[must_use]
    pub fn with_document(
        mut self,
        document_id: impl Into<String>,
        present: impl IntoIterator<Item = AttributeId>,
    ) -> Self {
        self.documents
            .insert(document_id.into(), present.into_iter().collect());
        self
    }
}

impl CatalogLookup for InMemoryCatalog {
    fn catalog_attributes(&self, reference: &str) -> Option<CatalogAttributes> {
        self.items.get(reference).cloned()
    }
}

impl NestedLookup for InMemoryCatalog {
    fn resolved_present(&self, document_id: &str) -> Option<AttributeSet> {
        self.documents.get(document_id).cloned()
    }
}
