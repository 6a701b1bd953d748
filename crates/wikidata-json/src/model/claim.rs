//! Claims (statements).

use serde_json::Value;

use crate::codec;
use crate::config::DecodeOptions;
use crate::error::CodecError;
use crate::model::{Identifier, Reference, Snak, SnakGroups};

/// A claim's preference level among claims for the same property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rank {
    Preferred,
    #[default]
    Normal,
    Deprecated,
}

impl Rank {
    /// The wire tag for this rank.
    pub fn tag(self) -> &'static str {
        match self {
            Rank::Preferred => "preferred",
            Rank::Normal => "normal",
            Rank::Deprecated => "deprecated",
        }
    }

    /// Creates a Rank from its wire tag.
    pub fn from_tag(tag: &str) -> Option<Rank> {
        match tag {
            "preferred" => Some(Rank::Preferred),
            "normal" => Some(Rank::Normal),
            "deprecated" => Some(Rank::Deprecated),
            _ => None,
        }
    }
}

/// A statement about an item.
///
/// `qualifiers` and `references` distinguish absence from emptiness: a
/// claim decoded without a `references` field serializes without one.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// Statement GUID, `<subject>$<uuid>`.
    pub id: String,
    pub rank: Rank,
    pub main_snak: Snak,
    pub qualifiers: Option<SnakGroups>,
    pub references: Option<Vec<Reference>>,
}

/// Generates a fresh statement GUID for a claim on `subject`.
pub fn new_statement_id(subject: Identifier) -> String {
    let guid = uuid::Uuid::new_v4().to_string().to_uppercase();
    format!("{}${}", subject, guid)
}

impl Claim {
    /// Creates a new normal-rank claim with a fresh GUID.
    pub fn new(subject: Identifier, main_snak: Snak) -> Self {
        Self {
            id: new_statement_id(subject),
            rank: Rank::Normal,
            main_snak,
            qualifiers: None,
            references: None,
        }
    }

    /// Creates a new claim `subject` → `property` → `entity`.
    pub fn new_item_statement(
        subject: Identifier,
        property: Identifier,
        entity: Identifier,
    ) -> Self {
        Self::new(subject, Snak::value_snak(property, entity))
    }

    /// The property of the main snak.
    pub fn property(&self) -> Identifier {
        self.main_snak.property
    }

    /// The entity the main snak points to, if it is an entity-id value.
    pub fn target_entity(&self) -> Option<Identifier> {
        self.main_snak.entity_value()
    }

    /// Appends a qualifier snak, creating the qualifier block if needed.
    pub fn add_qualifier(&mut self, snak: Snak) {
        self.qualifiers.get_or_insert_with(SnakGroups::new).push(snak);
    }

    /// Appends a reference, creating the reference list if needed.
    pub fn add_reference(&mut self, reference: Reference) {
        self.references.get_or_insert_with(Vec::new).push(reference);
    }

    /// Qualifier snaks for one property.
    pub fn qualifiers_for(&self, property: &Identifier) -> &[Snak] {
        self.qualifiers
            .as_ref()
            .map(|q| q.get(property))
            .unwrap_or(&[])
    }

    /// References attached to this claim.
    pub fn references(&self) -> &[Reference] {
        self.references.as_deref().unwrap_or(&[])
    }

    /// Decodes a claim from a parsed JSON node.
    pub fn parse(node: &Value) -> Result<Self, CodecError> {
        codec::decode_claim(node)
    }

    /// Decodes a claim from JSON text.
    pub fn parse_str(text: &str) -> Result<Self, CodecError> {
        codec::decode_fragment(text, &DecodeOptions::default(), codec::decode_claim)
    }

    /// Encodes this claim to its wire object.
    pub fn to_json(&self) -> Value {
        codec::encode_claim(self)
    }

    /// Encodes this claim to compact JSON text.
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (Identifier, Identifier, Identifier) {
        (
            Identifier::item(42).unwrap(),
            Identifier::property(31).unwrap(),
            Identifier::item(5).unwrap(),
        )
    }

    #[test]
    fn test_rank_tags() {
        for r in [Rank::Preferred, Rank::Normal, Rank::Deprecated] {
            assert_eq!(Rank::from_tag(r.tag()), Some(r));
        }
        assert_eq!(Rank::from_tag("best"), None);
        assert_eq!(Rank::default(), Rank::Normal);
    }

    #[test]
    fn test_new_item_statement() {
        let (q42, p31, q5) = ids();
        let claim = Claim::new_item_statement(q42, p31, q5);
        assert!(claim.id.starts_with("Q42$"));
        assert_eq!(claim.id.len(), "Q42$".len() + 36);
        assert_eq!(claim.id, claim.id.to_uppercase());
        assert_eq!(claim.rank, Rank::Normal);
        assert_eq!(claim.property(), p31);
        assert_eq!(claim.target_entity(), Some(q5));
        assert!(claim.qualifiers.is_none());
        assert!(claim.references.is_none());
        assert!(claim.references().is_empty());
    }

    #[test]
    fn test_statement_ids_are_unique() {
        let (q42, _, _) = ids();
        assert_ne!(new_statement_id(q42), new_statement_id(q42));
    }

    #[test]
    fn test_add_qualifier_and_reference() {
        let (q42, p31, q5) = ids();
        let p642 = Identifier::property(642).unwrap();
        let mut claim = Claim::new_item_statement(q42, p31, q5);

        claim.add_qualifier(Snak::value_snak(p642, Identifier::item(1).unwrap()));
        claim.add_qualifier(Snak::value_snak(p642, Identifier::item(2).unwrap()));
        assert_eq!(claim.qualifiers_for(&p642).len(), 2);
        assert_eq!(claim.qualifiers.as_ref().unwrap().len(), 1);

        claim.add_reference(Reference::single_snak(
            Identifier::property(143).unwrap(),
            Identifier::item(15180).unwrap(),
        ));
        assert_eq!(claim.references().len(), 1);
    }
}
