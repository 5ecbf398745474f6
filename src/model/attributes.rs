//! Safety attribute identifiers.
//!
//! Standard allergens are a closed enumeration. Operator-defined attributes
//! are carried as [`AttributeId::Custom`] with a normalized label, so two
//! spellings that differ only in case or surrounding whitespace compare equal.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The standard allergen list.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Allergen {
    Celery,
    Gluten,
    Crustaceans,
    Eggs,
    Fish,
    Lupin,
    Milk,
    Molluscs,
    Mustard,
    TreeNuts,
    Peanuts,
    Sesame,
    Soya,
    Sulphites,
}

impl Allergen {
    /// Every standard allergen, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Celery,
        Self::Gluten,
        Self::Crustaceans,
        Self::Eggs,
        Self::Fish,
        Self::Lupin,
        Self::Milk,
        Self::Molluscs,
        Self::Mustard,
        Self::TreeNuts,
        Self::Peanuts,
        Self::Sesame,
        Self::Soya,
        Self::Sulphites,
    ];

    /// Canonical identifier used in persisted documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Celery => "celery",
            Self::Gluten => "gluten",
            Self::Crustaceans => "crustaceans",
            Self::Eggs => "eggs",
            Self::Fish => "fish",
            Self::Lupin => "lupin",
            Self::Milk => "milk",
            Self::Molluscs => "molluscs",
            Self::Mustard => "mustard",
            Self::TreeNuts => "tree-nuts",
            Self::Peanuts => "peanuts",
            Self::Sesame => "sesame",
            Self::Soya => "soya",
            Self::Sulphites => "sulphites",
        }
    }

    /// Look up an allergen by canonical name or common alias.
    ///
    /// The input is expected to be trimmed and lowercased already.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let allergen = match name {
            "celery" => Self::Celery,
            "gluten" | "cereals" | "wheat" => Self::Gluten,
            "crustaceans" | "crustacean" | "shellfish" => Self::Crustaceans,
            "eggs" | "egg" => Self::Eggs,
            "fish" => Self::Fish,
            "lupin" | "lupine" => Self::Lupin,
            "milk" | "dairy" => Self::Milk,
            "molluscs" | "mollusc" | "mollusks" => Self::Molluscs,
            "mustard" => Self::Mustard,
            "tree-nuts" | "tree nuts" | "treenuts" | "nuts" => Self::TreeNuts,
            "peanuts" | "peanut" => Self::Peanuts,
            "sesame" => Self::Sesame,
            "soya" | "soy" => Self::Soya,
            "sulphites" | "sulfites" | "sulphur dioxide" => Self::Sulphites,
            _ => return None,
        };
        Some(allergen)
    }
}

impl fmt::Display for Allergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix marking an operator-defined attribute in textual form.
const CUSTOM_PREFIX: &str = "custom:";

/// Identifier of a safety attribute.
///
/// Serialized as a plain string: `"milk"`, `"tree-nuts"`, or `"custom:<label>"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AttributeId {
    Standard(Allergen),
    /// Operator-defined attribute; the label is trimmed and lowercased.
    Custom(String),
}

impl AttributeId {
    /// Build a custom attribute id from an operator label.
    pub fn custom(label: impl AsRef<str>) -> Self {
        Self::Custom(normalize_label(label.as_ref()))
    }

    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl From<Allergen> for AttributeId {
    fn from(allergen: Allergen) -> Self {
        Self::Standard(allergen)
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard(allergen) => write!(f, "{allergen}"),
            Self::Custom(label) => write!(f, "{CUSTOM_PREFIX}{label}"),
        }
    }
}

/// Error returned when an attribute identifier is blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("attribute identifier must not be empty")]
pub struct EmptyAttributeId;

impl FromStr for AttributeId {
    type Err = EmptyAttributeId;

    /// Parse an identifier. Unrecognized names become custom attributes
    /// rather than failing, since catalogs may carry site-specific hazards.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_label(s);
        if normalized.is_empty() {
            return Err(EmptyAttributeId);
        }
        if let Some(label) = normalized.strip_prefix(CUSTOM_PREFIX) {
            let label = label.trim();
            if label.is_empty() {
                return Err(EmptyAttributeId);
            }
            return Ok(Self::Custom(label.to_string()));
        }
        Ok(Allergen::from_name(&normalized).map_or(Self::Custom(normalized), Self::Standard))
    }
}

impl TryFrom<String> for AttributeId {
    type Error = EmptyAttributeId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AttributeId> for String {
    fn from(id: AttributeId) -> Self {
        id.to_string()
    }
}

/// An ordered set of attribute identifiers.
pub type AttributeSet = BTreeSet<AttributeId>;

/// Join an attribute set for display: `"milk, peanuts"`.
#[must_use]
pub fn join_attributes<'a>(ids: impl IntoIterator<Item = &'a AttributeId>) -> String {
    ids.into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_and_alias() {
        assert_eq!(
            "Peanut".parse::<AttributeId>().unwrap(),
            AttributeId::Standard(Allergen::Peanuts)
        );
        assert_eq!(
            " tree-nuts ".parse::<AttributeId>().unwrap(),
            AttributeId::Standard(Allergen::TreeNuts)
        );
        assert_eq!(
            "Soy".parse::<AttributeId>().unwrap(),
            AttributeId::Standard(Allergen::Soya)
        );
    }

    #[test]
    fn test_parse_custom() {
        assert_eq!(
            "custom: Kiwi".parse::<AttributeId>().unwrap(),
            AttributeId::custom("kiwi")
        );
        // Unknown names fall back to custom attributes
        assert_eq!(
            "Buckwheat".parse::<AttributeId>().unwrap(),
            AttributeId::custom("buckwheat")
        );
    }

    #[test]
    fn test_parse_empty_rejected() {
        assert!("   ".parse::<AttributeId>().is_err());
        assert!("custom:".parse::<AttributeId>().is_err());
    }

    #[test]
    fn test_display_parse_roundtrip_for_all_standard() {
        for allergen in Allergen::ALL {
            let id = AttributeId::from(allergen);
            assert_eq!(id.to_string().parse::<AttributeId>().unwrap(), id);
        }
        let custom = AttributeId::custom("Kiwi ");
        assert_eq!(custom.to_string(), "custom:kiwi");
        assert_eq!(custom.to_string().parse::<AttributeId>().unwrap(), custom);
    }

    #[test]
    fn test_serde_string_form() {
        let set: AttributeSet = [AttributeId::from(Allergen::Milk), AttributeId::custom("kiwi")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["milk","custom:kiwi"]"#);
        let back: AttributeSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_join_attributes() {
        let set: AttributeSet = [Allergen::Peanuts.into(), Allergen::Milk.into()]
            .into_iter()
            .collect();
        assert_eq!(join_attributes(&set), "milk, peanuts");
    }
}
