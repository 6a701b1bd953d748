//! Snak and snak-group encoding/decoding.
//!
//! Snak groups are the `{map, order array}` pairs used by references
//! (`snaks` / `snaks-order`) and claims (`qualifiers` / `qualifiers-order`).

use rustc_hash::FxHashSet;
use serde_json::{Map, Value};

use crate::codec::primitives::{ObjectReader, ObjectWriter, read_string_array};
use crate::codec::value::{decode_datavalue, encode_datavalue};
use crate::error::CodecError;
use crate::model::{Identifier, Snak, SnakGroups, SnakType, SnakValue};

const VALUE_SNAK_FIELDS: &[&str] = &["snaktype", "property", "hash", "datavalue", "datatype"];
const EMPTY_SNAK_FIELDS: &[&str] = &["snaktype", "property", "hash", "datatype"];

// =============================================================================
// DECODING
// =============================================================================

/// Decodes one snak.
pub fn decode_snak(node: &Value) -> Result<Snak, CodecError> {
    let reader = ObjectReader::new(node, "snak")?;

    let tag = reader.read_str("snaktype")?;
    let snak_type = SnakType::from_tag(tag).ok_or_else(|| CodecError::UnsupportedValue {
        context: "snak",
        value: tag.to_string(),
    })?;

    let fields = match snak_type {
        SnakType::Value => VALUE_SNAK_FIELDS,
        SnakType::NoValue | SnakType::SomeValue => EMPTY_SNAK_FIELDS,
    };
    reader.expect_len(fields.len())?;
    reader.expect_only(fields)?;

    let value = match snak_type {
        SnakType::Value => SnakValue::Value(decode_datavalue(reader.required("datavalue")?)?),
        SnakType::NoValue => SnakValue::NoValue,
        SnakType::SomeValue => SnakValue::SomeValue,
    };

    Ok(Snak {
        property: Identifier::parse_property(reader.read_str("property")?)?,
        hash: reader.read_str("hash")?.to_string(),
        datatype: reader.read_str("datatype")?.to_string(),
        value,
    })
}

/// Decodes a snak-group map together with its order array.
///
/// The order array must list every map key exactly once and nothing else.
/// Each group must be non-empty and every snak in it must belong to the
/// group's property.
pub fn decode_snak_groups(
    map: ObjectReader<'_>,
    order: &[Value],
    context: &'static str,
) -> Result<SnakGroups, CodecError> {
    let order = read_string_array(order, context)?;

    let mut listed = FxHashSet::default();
    for key in &order {
        if !listed.insert(*key) {
            return Err(CodecError::DuplicateOrderEntry {
                context,
                key: key.to_string(),
            });
        }
        if !map.contains(key) {
            return Err(CodecError::OrphanOrderEntry {
                context,
                key: key.to_string(),
            });
        }
    }
    if let Some((key, _)) = map.entries().find(|(k, _)| !listed.contains(k.as_str())) {
        return Err(CodecError::OrphanMapKey {
            context,
            key: key.clone(),
        });
    }

    let mut groups = SnakGroups::with_capacity(order.len());
    for key in order {
        let property = Identifier::parse_property(key)?;
        let snaks = map
            .optional(key)
            .and_then(Value::as_array)
            .ok_or(CodecError::WrongNodeType { context, expected: "array" })?;
        if snaks.is_empty() {
            return Err(CodecError::EmptySnakGroup {
                context,
                key: key.to_string(),
            });
        }

        for node in snaks {
            let snak = decode_snak(node)?;
            if snak.property != property {
                return Err(CodecError::KeyMismatch {
                    context,
                    key: key.to_string(),
                    field: "snak property",
                    found: snak.property.to_string(),
                });
            }
            groups.push(snak);
        }
    }
    Ok(groups)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes one snak.
pub fn encode_snak(snak: &Snak) -> Value {
    ObjectWriter::new()
        .field("snaktype", snak.snak_type().tag())
        .field("property", snak.property.to_string())
        .field("hash", snak.hash.as_str())
        .optional_field("datavalue", snak.value.as_value().map(encode_datavalue))
        .field("datatype", snak.datatype.as_str())
        .finish()
}

/// Encodes snak groups, returning the map and its order array.
///
/// The order array is derived from the groups' property sequence.
pub fn encode_snak_groups(groups: &SnakGroups) -> (Value, Value) {
    let mut map = Map::with_capacity(groups.len());
    let mut order = Vec::with_capacity(groups.len());
    for (property, snaks) in groups.iter() {
        let key = property.to_string();
        map.insert(key.clone(), Value::Array(snaks.iter().map(encode_snak).collect()));
        order.push(Value::String(key));
    }
    (Value::Object(map), Value::Array(order))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    fn value_snak_node(property: &str, item: u64) -> Value {
        json!({
            "snaktype": "value",
            "property": property,
            "hash": "",
            "datavalue": {
                "type": "wikibase-entityid",
                "value": {"id": format!("Q{}", item), "numeric-id": item, "entity-type": "item"}
            },
            "datatype": "wikibase-item"
        })
    }

    #[test]
    fn test_value_snak_literal_encoding() {
        let snak = Snak::value_snak(
            Identifier::property(143).unwrap(),
            Identifier::item(15180).unwrap(),
        );
        assert_eq!(
            snak.to_json_string(),
            concat!(
                r#"{"snaktype":"value","property":"P143","hash":"","#,
                r#""datavalue":{"type":"wikibase-entityid","#,
                r#""value":{"id":"Q15180","numeric-id":15180,"entity-type":"item"}},"#,
                r#""datatype":"wikibase-item"}"#,
            )
        );
    }

    #[test]
    fn test_snak_roundtrip() {
        let node = value_snak_node("P31", 5);
        let snak = decode_snak(&node).unwrap();
        assert_eq!(snak.property, Identifier::property(31).unwrap());
        assert_eq!(snak.entity_value(), Some(Identifier::item(5).unwrap()));
        assert_eq!(encode_snak(&snak), node);
    }

    #[test]
    fn test_novalue_snak() {
        let node = json!({
            "snaktype": "novalue",
            "property": "P40",
            "hash": "abc",
            "datatype": "wikibase-item"
        });
        let snak = decode_snak(&node).unwrap();
        assert_eq!(snak.value, SnakValue::NoValue);
        assert_eq!(encode_snak(&snak), node);
    }

    #[test]
    fn test_snak_field_count_must_match_type() {
        // somevalue with a datavalue
        let mut node = value_snak_node("P31", 5);
        node["snaktype"] = json!("somevalue");
        assert!(matches!(
            decode_snak(&node),
            Err(CodecError::FieldCount { expected: 4, found: 5, .. })
        ));

        // value without a datavalue
        let node = json!({
            "snaktype": "value",
            "property": "P31",
            "hash": "",
            "datatype": "wikibase-item"
        });
        assert!(matches!(
            decode_snak(&node),
            Err(CodecError::FieldCount { expected: 5, found: 4, .. })
        ));

        // novalue with datavalue in place of hash
        let node = json!({
            "snaktype": "novalue",
            "property": "P31",
            "datavalue": {},
            "datatype": "wikibase-item"
        });
        assert!(matches!(
            decode_snak(&node),
            Err(CodecError::UnexpectedField { .. })
        ));
    }

    #[test]
    fn test_snak_rejects_bad_property_and_type() {
        let node = value_snak_node("Q31", 5);
        assert_eq!(decode_snak(&node).unwrap_err().kind(), ErrorKind::InvalidIdentifier);

        let mut node = value_snak_node("P31", 5);
        node["snaktype"] = json!("maybe");
        assert!(decode_snak(&node).unwrap_err().is_schema_violation());
    }

    fn groups_node() -> (Value, Value) {
        (
            json!({
                "P248": [value_snak_node("P248", 36578)],
                "P143": [value_snak_node("P143", 328), value_snak_node("P143", 15180)]
            }),
            json!(["P248", "P143"]),
        )
    }

    fn decode_groups(map: &Value, order: &Value) -> Result<SnakGroups, CodecError> {
        decode_snak_groups(
            ObjectReader::new(map, "snaks").unwrap(),
            order.as_array().unwrap(),
            "reference",
        )
    }

    #[test]
    fn test_snak_groups_roundtrip() {
        let (map, order) = groups_node();
        let groups = decode_groups(&map, &order).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get(&Identifier::property(143).unwrap()).len(), 2);

        let (map_out, order_out) = encode_snak_groups(&groups);
        assert_eq!(map_out, map);
        assert_eq!(order_out, order);
    }

    #[test]
    fn test_snak_groups_follow_order_array() {
        let (map, _) = groups_node();
        let order = json!(["P143", "P248"]);
        let groups = decode_groups(&map, &order).unwrap();
        let (_, order_out) = encode_snak_groups(&groups);
        assert_eq!(order_out, order);
    }

    #[test]
    fn test_snak_groups_orphans() {
        let (map, _) = groups_node();

        let err = decode_groups(&map, &json!(["P248"])).unwrap_err();
        assert!(matches!(err, CodecError::OrphanMapKey { ref key, .. } if key == "P143"));

        let err = decode_groups(&map, &json!(["P248", "P143", "P854"])).unwrap_err();
        assert!(matches!(err, CodecError::OrphanOrderEntry { ref key, .. } if key == "P854"));

        let err = decode_groups(&map, &json!(["P248", "P143", "P248"])).unwrap_err();
        assert!(matches!(err, CodecError::DuplicateOrderEntry { .. }));
        assert!(err.is_schema_violation());
    }

    #[test]
    fn test_snak_groups_property_mismatch() {
        let map = json!({"P143": [value_snak_node("P248", 1)]});
        let err = decode_groups(&map, &json!(["P143"])).unwrap_err();
        assert!(matches!(err, CodecError::KeyMismatch { .. }));
    }

    #[test]
    fn test_snak_groups_empty_group() {
        let map = json!({"P143": []});
        let err = decode_groups(&map, &json!(["P143"])).unwrap_err();
        assert!(matches!(err, CodecError::EmptySnakGroup { .. }));
    }
}
