use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Stable identifier of a cataloged entity
pub type EntityId = String;

/// Well-known attribute keys used by the default scoring and matching rules
pub mod attributes {
    pub const NAME: &str = "name";
    pub const PRICE: &str = "price";
    pub const RAM_GB: &str = "ram_gb";
    pub const STORAGE_GB: &str = "storage_gb";
    pub const RATING: &str = "rating";
    pub const BATTERY_MAH: &str = "battery_mah";
    pub const SCREEN_INCHES: &str = "screen_inches";
    pub const SCREEN_RESOLUTION: &str = "screen_resolution";
    pub const DISCOUNT_PCT: &str = "discount_pct";
    pub const WARRANTY_MONTHS: &str = "warranty_months";
}

/// A loosely-typed attribute value as delivered by a source system.
///
/// Source systems sometimes return several values for one attribute. Only the
/// first element of a list is meaningful; see [`AttributeValue::first`].
/// Shapes no other variant accepts, such as mixed lists or booleans, are kept
/// as raw JSON in [`AttributeValue::Other`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(untagged)]
pub enum AttributeValue {
    #[default]
    Absent,
    Number(f64),
    Text(String),
    NumberList(Vec<f64>),
    TextList(Vec<String>),
    Other(serde_json::Value),
}

/// Borrowed view of a single scalar, after list unwrapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Number(f64),
    Text(&'a str),
}

impl AttributeValue {
    /// The scalar this value stands for: the value itself, or the first
    /// element of a list. `None` for absent values and empty lists.
    pub fn first(&self) -> Option<Scalar<'_>> {
        match self {
            AttributeValue::Absent => None,
            AttributeValue::Number(n) => Some(Scalar::Number(*n)),
            AttributeValue::Text(s) => Some(Scalar::Text(s)),
            AttributeValue::NumberList(v) => v.first().map(|n| Scalar::Number(*n)),
            AttributeValue::TextList(v) => v.first().map(|s| Scalar::Text(s)),
            AttributeValue::Other(value) => {
                let head = match value {
                    serde_json::Value::Array(items) => items.first()?,
                    other => other,
                };
                match head {
                    serde_json::Value::Number(n) => n.as_f64().map(Scalar::Number),
                    serde_json::Value::String(s) => Some(Scalar::Text(s)),
                    _ => None,
                }
            }
        }
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        self.first().is_none()
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        AttributeValue::Number(n as f64)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<Vec<f64>> for AttributeValue {
    fn from(v: Vec<f64>) -> Self {
        AttributeValue::NumberList(v)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(v: Vec<String>) -> Self {
        AttributeValue::TextList(v)
    }
}

static ABSENT: AttributeValue = AttributeValue::Absent;

/// A cataloged item: id, taxonomy tags and attributes.
///
/// Entities are immutable snapshots for the duration of an engine call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    #[serde(default)]
    pub types: BTreeSet<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Entity {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            types: BTreeSet::new(),
            attributes: BTreeMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_type(mut self, label: impl Into<String>) -> Self {
        self.types.insert(label.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Attribute value for `key`, [`AttributeValue::Absent`] if missing
    pub fn get(&self, key: &str) -> &AttributeValue {
        self.attributes.get(key).unwrap_or(&ABSENT)
    }

    #[inline]
    pub fn has_type(&self, label: &str) -> bool {
        self.types.contains(label)
    }

    /// Human-readable name: the `name` text attribute, or the id
    pub fn name(&self) -> &str {
        match self.get(attributes::NAME).first() {
            Some(Scalar::Text(name)) if !name.is_empty() => name,
            _ => &self.id,
        }
    }

    /// The first of `known` (in the given order) carried as a type label
    pub fn category<'a, S: AsRef<str>>(&self, known: &'a [S]) -> Option<&'a str> {
        known
            .iter()
            .map(|label| label.as_ref())
            .find(|label| self.types.contains(*label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_unwraps_lists() {
        assert_eq!(AttributeValue::Number(8.0).first(), Some(Scalar::Number(8.0)));
        assert_eq!(
            AttributeValue::NumberList(vec![16.0, 32.0]).first(),
            Some(Scalar::Number(16.0))
        );
        assert_eq!(
            AttributeValue::TextList(vec!["a".into(), "b".into()]).first(),
            Some(Scalar::Text("a"))
        );
        assert_eq!(AttributeValue::NumberList(vec![]).first(), None);
        assert!(AttributeValue::Absent.is_absent());
    }

    #[test]
    fn test_name_falls_back_to_id() {
        let named = Entity::new("p1").with_attribute(attributes::NAME, "Dell XPS 13");
        assert_eq!(named.name(), "Dell XPS 13");

        let unnamed = Entity::new("p2").with_attribute(attributes::NAME, 42.0);
        assert_eq!(unnamed.name(), "p2");
    }

    #[test]
    fn test_category_respects_known_order() {
        let entity = Entity::new("p1").with_type("Product").with_type("Tablet").with_type("Laptop");
        assert_eq!(entity.category(&["Laptop", "Tablet"]), Some("Laptop"));
        assert_eq!(entity.category(&["Tablet", "Laptop"]), Some("Tablet"));
        assert_eq!(entity.category(&["Desktop"]), None);
    }

    #[test]
    fn test_serde_untagged_attributes() {
        let json = serde_json::json!({
            "id": "p1",
            "types": ["Laptop", "Laptop"],
            "attributes": {
                "price": 999.5,
                "ram_gb": [16, 32],
                "name": "Book",
                "colors": ["black", "silver"],
                "notes": null
            }
        });
        let entity: Entity = serde_json::from_value(json).unwrap();

        assert_eq!(entity.types.len(), 1);
        assert_eq!(entity.get("price"), &AttributeValue::Number(999.5));
        assert_eq!(entity.get("ram_gb"), &AttributeValue::NumberList(vec![16.0, 32.0]));
        assert_eq!(entity.get("name"), &AttributeValue::Text("Book".into()));
        assert!(entity.get("notes").is_absent());
        assert!(entity.get("missing").is_absent());
    }

    #[test]
    fn test_mixed_lists_fall_back_to_raw_json() {
        let json = serde_json::json!({
            "id": "p1",
            "attributes": {
                "ram_gb": [16, "16GB"],
                "storage_gb": ["512GB", 512],
                "in_stock": true,
                "dims": [[30, 20]]
            }
        });
        let entity: Entity = serde_json::from_value(json).unwrap();

        assert!(matches!(entity.get("ram_gb"), AttributeValue::Other(_)));
        assert_eq!(entity.get("ram_gb").first(), Some(Scalar::Number(16.0)));
        assert_eq!(entity.get("storage_gb").first(), Some(Scalar::Text("512GB")));
        assert!(entity.get("in_stock").is_absent());
        assert!(entity.get("dims").is_absent());
        assert_eq!(crate::accessor::numeric(&entity, "ram_gb"), 16.0);
    }
}
