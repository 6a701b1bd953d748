//! Snaks: single property-value (or property-only) assertions.

use serde_json::Value;

use crate::codec;
use crate::config::DecodeOptions;
use crate::error::CodecError;
use crate::model::{Identifier, OrderedMapping, TypedValue};

/// Datatype string for properties whose values are items.
pub const DATATYPE_ITEM: &str = "wikibase-item";

/// Snak type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnakType {
    /// The property has the attached value.
    Value,
    /// The property is known to have no value.
    NoValue,
    /// The property has some value that is not known.
    SomeValue,
}

impl SnakType {
    /// The wire tag for this type.
    pub fn tag(self) -> &'static str {
        match self {
            SnakType::Value => "value",
            SnakType::NoValue => "novalue",
            SnakType::SomeValue => "somevalue",
        }
    }

    /// Creates a SnakType from its wire tag.
    pub fn from_tag(tag: &str) -> Option<SnakType> {
        match tag {
            "value" => Some(SnakType::Value),
            "novalue" => Some(SnakType::NoValue),
            "somevalue" => Some(SnakType::SomeValue),
            _ => None,
        }
    }
}

/// What a snak asserts about its property.
#[derive(Debug, Clone, PartialEq)]
pub enum SnakValue {
    /// The property has this value.
    Value(TypedValue),
    /// The property is known to have no value.
    NoValue,
    /// The property has some value that is not known.
    SomeValue,
}

impl SnakValue {
    /// The snak type this value is written as.
    pub fn snak_type(&self) -> SnakType {
        match self {
            SnakValue::Value(_) => SnakType::Value,
            SnakValue::NoValue => SnakType::NoValue,
            SnakValue::SomeValue => SnakType::SomeValue,
        }
    }

    pub fn as_value(&self) -> Option<&TypedValue> {
        match self {
            SnakValue::Value(v) => Some(v),
            SnakValue::NoValue | SnakValue::SomeValue => None,
        }
    }
}

/// One snak.
#[derive(Debug, Clone, PartialEq)]
pub struct Snak {
    pub property: Identifier,
    /// Content hash assigned by the service; empty for new snaks.
    pub hash: String,
    /// Datatype of the property, e.g. `wikibase-item` or `external-id`.
    pub datatype: String,
    pub value: SnakValue,
}

impl Snak {
    /// Synthesizes a new `value` snak asserting `property` → `entity`.
    ///
    /// The hash is left empty for the service to fill in.
    pub fn value_snak(property: Identifier, entity: Identifier) -> Self {
        Self::with_value(property, DATATYPE_ITEM, TypedValue::EntityId(entity))
    }

    /// Creates a `value` snak with an arbitrary value and datatype.
    pub fn with_value(
        property: Identifier,
        datatype: impl Into<String>,
        value: TypedValue,
    ) -> Self {
        Self {
            property,
            hash: String::new(),
            datatype: datatype.into(),
            value: SnakValue::Value(value),
        }
    }

    /// Creates a `novalue` snak.
    pub fn no_value(property: Identifier, datatype: impl Into<String>) -> Self {
        Self {
            property,
            hash: String::new(),
            datatype: datatype.into(),
            value: SnakValue::NoValue,
        }
    }

    /// Creates a `somevalue` snak.
    pub fn some_value(property: Identifier, datatype: impl Into<String>) -> Self {
        Self {
            property,
            hash: String::new(),
            datatype: datatype.into(),
            value: SnakValue::SomeValue,
        }
    }

    pub fn snak_type(&self) -> SnakType {
        self.value.snak_type()
    }

    /// Returns the referenced entity if this is a `value` snak with an
    /// entity-id value.
    pub fn entity_value(&self) -> Option<Identifier> {
        self.value.as_value().and_then(TypedValue::as_entity)
    }

    /// Decodes a snak from a parsed JSON node.
    pub fn parse(node: &Value) -> Result<Self, CodecError> {
        codec::decode_snak(node)
    }

    /// Decodes a snak from JSON text.
    pub fn parse_str(text: &str) -> Result<Self, CodecError> {
        codec::decode_fragment(text, &DecodeOptions::default(), codec::decode_snak)
    }

    /// Encodes this snak to its wire object.
    pub fn to_json(&self) -> Value {
        codec::encode_snak(self)
    }

    /// Encodes this snak to compact JSON text.
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

/// Snaks grouped by property, in wire order.
///
/// Used for reference snaks and claim qualifiers. Groups are only created
/// by [`SnakGroups::push`], so every group is non-empty and holds snaks of
/// its own property.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnakGroups {
    groups: OrderedMapping<Identifier, Vec<Snak>>,
}

impl SnakGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            groups: OrderedMapping::with_capacity(capacity),
        }
    }

    /// Appends a snak to the group for its property, opening the group at
    /// the end if it is new.
    pub fn push(&mut self, snak: Snak) {
        self.groups.get_or_insert_with(snak.property, Vec::new).push(snak);
    }

    /// Snaks for one property, in wire order.
    pub fn get(&self, property: &Identifier) -> &[Snak] {
        self.groups.get(property).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Properties in wire order.
    pub fn properties(&self) -> impl ExactSizeIterator<Item = &Identifier> {
        self.groups.keys()
    }

    /// Property/snaks pairs in wire order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Identifier, &[Snak])> {
        self.groups.iter().map(|(p, snaks)| (p, snaks.as_slice()))
    }

    /// All snaks, group by group.
    pub fn snaks(&self) -> impl Iterator<Item = &Snak> {
        self.groups.values().flatten()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<Snak> for SnakGroups {
    fn from_iter<I: IntoIterator<Item = Snak>>(iter: I) -> Self {
        let mut groups = Self::new();
        for snak in iter {
            groups.push(snak);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snak_type_tags() {
        for t in [SnakType::Value, SnakType::NoValue, SnakType::SomeValue] {
            assert_eq!(SnakType::from_tag(t.tag()), Some(t));
        }
        assert_eq!(SnakType::from_tag("VALUE"), None);
    }

    #[test]
    fn test_value_snak() {
        let p143 = Identifier::property(143).unwrap();
        let q15180 = Identifier::item(15180).unwrap();
        let snak = Snak::value_snak(p143, q15180);
        assert_eq!(snak.snak_type(), SnakType::Value);
        assert_eq!(snak.hash, "");
        assert_eq!(snak.datatype, DATATYPE_ITEM);
        assert_eq!(snak.entity_value(), Some(q15180));
    }

    #[test]
    fn test_snaks_without_value() {
        let p = Identifier::property(570).unwrap();
        let snak = Snak::some_value(p, "time");
        assert_eq!(snak.snak_type(), SnakType::SomeValue);
        assert_eq!(snak.value.as_value(), None);
        assert_eq!(snak.entity_value(), None);
        assert_eq!(Snak::no_value(p, "time").snak_type(), SnakType::NoValue);
    }

    #[test]
    fn test_groups_key_by_snak_property() {
        let p143 = Identifier::property(143).unwrap();
        let p248 = Identifier::property(248).unwrap();
        let groups: SnakGroups = [
            Snak::value_snak(p248, Identifier::item(1).unwrap()),
            Snak::value_snak(p143, Identifier::item(2).unwrap()),
            Snak::some_value(p248, DATATYPE_ITEM),
        ]
        .into_iter()
        .collect();

        assert_eq!(groups.properties().copied().collect::<Vec<_>>(), vec![p248, p143]);
        assert_eq!(groups.get(&p248).len(), 2);
        assert!(groups.get(&Identifier::property(1).unwrap()).is_empty());
        assert_eq!(groups.snaks().count(), 3);
        for (property, snaks) in groups.iter() {
            assert!(!snaks.is_empty());
            assert!(snaks.iter().all(|s| s.property == *property));
        }
    }
}
