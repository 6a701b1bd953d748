//! Item and property identifiers.
//!
//! Wikibase identifiers are a one-letter marker followed by a positive
//! decimal integer without leading zeros: `Q42` for items, `P31` for
//! properties.

use std::fmt;
use std::str::FromStr;

use crate::error::CodecError;

/// The kind of entity an identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Item,
    Property,
}

impl EntityKind {
    /// The marker character that prefixes identifiers of this kind.
    pub fn marker(self) -> char {
        match self {
            EntityKind::Item => 'Q',
            EntityKind::Property => 'P',
        }
    }

    /// The `entity-type` string used in entity-id values.
    pub fn entity_type(self) -> &'static str {
        match self {
            EntityKind::Item => "item",
            EntityKind::Property => "property",
        }
    }

    /// Maps an `entity-type` string back to a kind.
    pub fn from_entity_type(s: &str) -> Option<EntityKind> {
        match s {
            "item" => Some(EntityKind::Item),
            "property" => Some(EntityKind::Property),
            _ => None,
        }
    }

    fn from_marker(c: char) -> Option<EntityKind> {
        match c {
            'Q' => Some(EntityKind::Item),
            'P' => Some(EntityKind::Property),
            _ => None,
        }
    }
}

/// A validated item or property identifier.
///
/// The numeric part is always at least 1, so the textual form produced by
/// `Display` is canonical and parses back to an equal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    kind: EntityKind,
    number: u64,
}

impl Identifier {
    /// Builds an identifier from its kind and numeric part.
    pub fn from_number(kind: EntityKind, number: u64) -> Result<Self, CodecError> {
        if number < 1 {
            return Err(CodecError::InvalidIdentifier {
                text: format!("{}{}", kind.marker(), number),
                reason: "numeric part must be at least 1",
            });
        }
        Ok(Self { kind, number })
    }

    /// Builds an item identifier (`Q<number>`).
    pub fn item(number: u64) -> Result<Self, CodecError> {
        Self::from_number(EntityKind::Item, number)
    }

    /// Builds a property identifier (`P<number>`).
    pub fn property(number: u64) -> Result<Self, CodecError> {
        Self::from_number(EntityKind::Property, number)
    }

    /// Parses an identifier that must be of the given kind.
    pub fn parse(kind: EntityKind, text: &str) -> Result<Self, CodecError> {
        let id: Identifier = text.parse()?;
        if id.kind != kind {
            return Err(CodecError::InvalidIdentifier {
                text: text.to_string(),
                reason: match kind {
                    EntityKind::Item => "expected an item identifier (Q...)",
                    EntityKind::Property => "expected a property identifier (P...)",
                },
            });
        }
        Ok(id)
    }

    /// Parses an item identifier.
    pub fn parse_item(text: &str) -> Result<Self, CodecError> {
        Self::parse(EntityKind::Item, text)
    }

    /// Parses a property identifier.
    pub fn parse_property(text: &str) -> Result<Self, CodecError> {
        Self::parse(EntityKind::Property, text)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn is_item(&self) -> bool {
        self.kind == EntityKind::Item
    }

    pub fn is_property(&self) -> bool {
        self.kind == EntityKind::Property
    }
}

impl FromStr for Identifier {
    type Err = CodecError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| CodecError::InvalidIdentifier {
            text: text.to_string(),
            reason,
        };

        let mut chars = text.chars();
        let kind = chars
            .next()
            .and_then(EntityKind::from_marker)
            .ok_or_else(|| invalid("must start with Q or P"))?;

        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("numeric part must be decimal digits"));
        }
        if digits.starts_with('0') {
            return Err(if digits.bytes().all(|b| b == b'0') {
                invalid("numeric part must be at least 1")
            } else {
                invalid("numeric part must not have leading zeros")
            });
        }
        let number: u64 = digits.parse().map_err(|_| invalid("numeric part is too large"))?;

        Self::from_number(kind, number)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.marker(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_roundtrip() {
        let id = Identifier::parse_item("Q15180").unwrap();
        assert_eq!(id.kind(), EntityKind::Item);
        assert_eq!(id.number(), 15180);
        assert_eq!(id.to_string(), "Q15180");

        let prop: Identifier = "P143".parse().unwrap();
        assert!(prop.is_property());
        assert_eq!(prop.to_string(), "P143");
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for text in ["Q0", "P-1", "X5", "", "Q", "q5", "Q5a", "Q 5", "Q+5", "Q007", "P00"] {
            let err = text.parse::<Identifier>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidIdentifier, "{text}");
        }
    }

    #[test]
    fn test_parse_rejects_wrong_kind() {
        assert!(Identifier::parse_item("P31").is_err());
        assert!(Identifier::parse_property("Q5").is_err());
    }

    #[test]
    fn test_from_number() {
        assert_eq!(Identifier::item(42).unwrap().to_string(), "Q42");
        assert_eq!(Identifier::property(31).unwrap().to_string(), "P31");
        assert!(matches!(
            Identifier::item(0),
            Err(CodecError::InvalidIdentifier { .. })
        ));
        assert_eq!(Identifier::item(u64::MAX).unwrap().number(), u64::MAX);
    }

    #[test]
    fn test_parse_large_numbers() {
        let id = Identifier::parse_item("Q9007199254740992").unwrap();
        assert_eq!(id.number(), 1 << 53);
        assert_eq!(id.to_string(), "Q9007199254740992");

        let max: Identifier = "P18446744073709551615".parse().unwrap();
        assert_eq!(max.number(), u64::MAX);

        for text in ["Q18446744073709551616", "Q99999999999999999999999"] {
            let err = text.parse::<Identifier>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidIdentifier, "{text}");
        }
    }

    #[test]
    fn test_entity_type_mapping() {
        assert_eq!(EntityKind::from_entity_type("item"), Some(EntityKind::Item));
        assert_eq!(EntityKind::from_entity_type("property"), Some(EntityKind::Property));
        assert_eq!(EntityKind::from_entity_type("lexeme"), None);
        assert_eq!(EntityKind::Property.entity_type(), "property");
    }

    proptest! {
        #[test]
        fn prop_text_roundtrip(number in 1u64..=u64::MAX, is_item in any::<bool>()) {
            let kind = if is_item { EntityKind::Item } else { EntityKind::Property };
            let id = Identifier::from_number(kind, number).unwrap();
            let parsed = Identifier::parse(kind, &id.to_string()).unwrap();
            prop_assert_eq!(id, parsed);
        }
    }
}
