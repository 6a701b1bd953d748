//! Claim (statement) encoding/decoding.

use serde_json::Value;

use crate::codec::primitives::{ObjectReader, ObjectWriter};
use crate::codec::reference::{decode_reference, encode_reference};
use crate::codec::snak::{decode_snak, decode_snak_groups, encode_snak, encode_snak_groups};
use crate::error::CodecError;
use crate::model::{Claim, Rank, Reference};

const CLAIM_FIELDS: &[&str] = &[
    "id",
    "rank",
    "mainsnak",
    "references",
    "qualifiers",
    "qualifiers-order",
    "type",
];

/// Discriminator every claim must carry.
const STATEMENT_TYPE: &str = "statement";

/// Decodes one claim.
///
/// Unknown field names are rejected so that a change in the service's
/// schema surfaces as an error instead of a silently dropped field.
pub fn decode_claim(node: &Value) -> Result<Claim, CodecError> {
    let reader = ObjectReader::new(node, "claim")?;
    reader.expect_only(CLAIM_FIELDS)?;
    reader.expect_str("type", STATEMENT_TYPE)?;

    let rank_tag = reader.read_str("rank")?;
    let rank = Rank::from_tag(rank_tag).ok_or_else(|| CodecError::UnsupportedValue {
        context: "claim rank",
        value: rank_tag.to_string(),
    })?;

    let qualifiers = match (reader.optional("qualifiers"), reader.optional("qualifiers-order")) {
        (None, None) => None,
        (Some(_), None) => {
            return Err(CodecError::MissingField {
                context: "claim",
                field: "qualifiers-order",
            });
        }
        (None, Some(_)) => {
            return Err(CodecError::MissingField {
                context: "claim",
                field: "qualifiers",
            });
        }
        (Some(_), Some(_)) => {
            let map = reader.read_object("qualifiers", "claim qualifiers")?;
            let order = reader.read_array("qualifiers-order")?;
            Some(decode_snak_groups(map, order, "claim qualifiers")?)
        }
    };

    let references = match reader.optional("references") {
        None => None,
        Some(_) => Some(
            reader
                .read_array("references")?
                .iter()
                .map(decode_reference)
                .collect::<Result<Vec<Reference>, _>>()?,
        ),
    };

    Ok(Claim {
        id: reader.read_str("id")?.to_string(),
        rank,
        main_snak: decode_snak(reader.required("mainsnak")?)?,
        qualifiers,
        references,
    })
}

/// Encodes one claim, omitting absent qualifier/reference blocks.
pub fn encode_claim(claim: &Claim) -> Value {
    let mut writer = ObjectWriter::new()
        .field("mainsnak", encode_snak(&claim.main_snak))
        .field("type", STATEMENT_TYPE);

    if let Some(qualifiers) = &claim.qualifiers {
        let (map, order) = encode_snak_groups(qualifiers);
        writer = writer.field("qualifiers", map).field("qualifiers-order", order);
    }

    writer
        .field("id", claim.id.as_str())
        .field("rank", claim.rank.tag())
        .optional_field(
            "references",
            claim
                .references
                .as_ref()
                .map(|refs| Value::Array(refs.iter().map(encode_reference).collect())),
        )
        .finish()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{Identifier, SnakType};

    fn main_snak() -> Value {
        json!({
            "snaktype": "value",
            "property": "P31",
            "hash": "ad7d38a03cdd40cdc373de0dc4e7b7fcbccb31d9",
            "datavalue": {
                "type": "wikibase-entityid",
                "value": {"id": "Q5", "numeric-id": 5, "entity-type": "item"}
            },
            "datatype": "wikibase-item"
        })
    }

    fn claim_node() -> Value {
        json!({
            "mainsnak": main_snak(),
            "type": "statement",
            "id": "Q42$F078E5B3-F9A8-480E-B7AC-D97778CBBEF9",
            "rank": "normal"
        })
    }

    fn qualifier_snak() -> Value {
        json!({
            "snaktype": "somevalue",
            "property": "P1480",
            "hash": "4a6b2ff0b5d0cc2b1b6b5a0ef3b0e5d8d1cc2f8a",
            "datatype": "wikibase-item"
        })
    }

    #[test]
    fn test_minimal_claim_roundtrip() {
        let node = claim_node();
        let claim = decode_claim(&node).unwrap();
        assert_eq!(claim.id, "Q42$F078E5B3-F9A8-480E-B7AC-D97778CBBEF9");
        assert_eq!(claim.rank, Rank::Normal);
        assert_eq!(claim.target_entity(), Some(Identifier::item(5).unwrap()));
        assert!(claim.qualifiers.is_none());
        assert!(claim.references.is_none());

        let encoded = encode_claim(&claim);
        assert_eq!(encoded, node);
        assert!(encoded.get("references").is_none());
        assert!(encoded.get("qualifiers").is_none());
    }

    #[test]
    fn test_claim_with_qualifiers_and_references() {
        let mut node = claim_node();
        let obj = node.as_object_mut().unwrap();
        obj.insert("qualifiers".into(), json!({"P1480": [qualifier_snak()]}));
        obj.insert("qualifiers-order".into(), json!(["P1480"]));
        obj.insert("rank".into(), json!("preferred"));
        obj.insert(
            "references".into(),
            json!([{
                "hash": "fa278ebfc458360e5aed63d5058cca83c46134f1",
                "snaks": {"P143": [{
                    "snaktype": "value",
                    "property": "P143",
                    "hash": "",
                    "datavalue": {
                        "type": "wikibase-entityid",
                        "value": {"id": "Q328", "numeric-id": 328, "entity-type": "item"}
                    },
                    "datatype": "wikibase-item"
                }]},
                "snaks-order": ["P143"]
            }]),
        );

        let claim = decode_claim(&node).unwrap();
        assert_eq!(claim.rank, Rank::Preferred);
        let p1480 = Identifier::property(1480).unwrap();
        assert_eq!(claim.qualifiers_for(&p1480)[0].snak_type(), SnakType::SomeValue);
        assert_eq!(claim.references().len(), 1);
        assert_eq!(encode_claim(&claim), node);
    }

    #[test]
    fn test_empty_blocks_are_preserved() {
        let mut node = claim_node();
        let obj = node.as_object_mut().unwrap();
        obj.insert("qualifiers".into(), json!({}));
        obj.insert("qualifiers-order".into(), json!([]));
        obj.insert("references".into(), json!([]));

        let claim = decode_claim(&node).unwrap();
        assert_eq!(claim.qualifiers.as_ref().map(|q| q.len()), Some(0));
        assert_eq!(claim.references.as_ref().map(Vec::len), Some(0));
        assert_eq!(encode_claim(&claim), node);
    }

    #[test]
    fn test_claim_rejects_unknown_field() {
        let mut node = claim_node();
        node["qualifiers-hash"] = json!("x");
        assert!(matches!(
            decode_claim(&node),
            Err(CodecError::UnexpectedField { ref field, .. }) if field == "qualifiers-hash"
        ));
    }

    #[test]
    fn test_claim_requires_statement_type() {
        let mut node = claim_node();
        node["type"] = json!("claim");
        assert!(matches!(
            decode_claim(&node),
            Err(CodecError::FixedValueMismatch { field: "type", .. })
        ));

        let mut node = claim_node();
        node.as_object_mut().unwrap().remove("type");
        assert!(matches!(
            decode_claim(&node),
            Err(CodecError::MissingField { field: "type", .. })
        ));
    }

    #[test]
    fn test_claim_rejects_unknown_rank() {
        let mut node = claim_node();
        node["rank"] = json!("best");
        assert!(decode_claim(&node).unwrap_err().is_schema_violation());
    }

    #[test]
    fn test_claim_qualifier_order_pairing() {
        let mut node = claim_node();
        node["qualifiers"] = json!({"P1480": [qualifier_snak()]});
        assert!(matches!(
            decode_claim(&node),
            Err(CodecError::MissingField { field: "qualifiers-order", .. })
        ));

        node["qualifiers-order"] = json!(["P1480", "P585"]);
        assert!(matches!(
            decode_claim(&node),
            Err(CodecError::OrphanOrderEntry { .. })
        ));
    }
}
