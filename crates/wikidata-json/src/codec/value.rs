//! Typed value encoding/decoding.
//!
//! A `datavalue` is a two-field envelope `{type, value}`; the inner value's
//! shape depends on the type tag:
//!
//! ```text
//! string             "text"
//! globecoordinate    {latitude, longitude, altitude: null, precision, globe}
//! wikibase-entityid  {id, numeric-id, entity-type}
//! quantity           opaque object
//! time               {time, timezone, before: 0, after: 0, precision, calendarmodel}
//! monolingualtext    opaque object
//! ```

use serde_json::{Map, Value};

use crate::codec::primitives::{ObjectReader, ObjectWriter, normalized_number};
use crate::error::CodecError;
use crate::model::{EntityKind, GlobeCoordinate, Identifier, TypedValue, ValueKind, WdTime};

const ENVELOPE_FIELDS: &[&str] = &["type", "value"];
const COORDINATE_FIELDS: &[&str] = &["latitude", "longitude", "altitude", "precision", "globe"];
const ENTITY_FIELDS: &[&str] = &["id", "numeric-id", "entity-type"];
const TIME_FIELDS: &[&str] = &["time", "timezone", "before", "after", "precision", "calendarmodel"];

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a `datavalue` envelope.
pub fn decode_datavalue(node: &Value) -> Result<TypedValue, CodecError> {
    let reader = ObjectReader::new(node, "datavalue")?;
    reader.expect_len(ENVELOPE_FIELDS.len())?;
    reader.expect_only(ENVELOPE_FIELDS)?;
    let tag = reader.read_str("type")?;
    decode_value(tag, reader.required("value")?)
}

/// Decodes the inner value for the given type tag.
pub fn decode_value(tag: &str, node: &Value) -> Result<TypedValue, CodecError> {
    let kind = ValueKind::from_tag(tag).ok_or_else(|| CodecError::UnknownValueKind {
        kind: tag.to_string(),
    })?;
    match kind {
        ValueKind::String => decode_string(node),
        ValueKind::GlobeCoordinate => decode_coordinate(node),
        ValueKind::EntityId => decode_entity_id(node),
        ValueKind::Quantity => decode_opaque(node, "quantity value").map(TypedValue::Quantity),
        ValueKind::Time => decode_time(node),
        ValueKind::MonolingualText => {
            decode_opaque(node, "monolingualtext value").map(TypedValue::MonolingualText)
        }
    }
}

fn decode_string(node: &Value) -> Result<TypedValue, CodecError> {
    match node {
        Value::String(s) => Ok(TypedValue::String(s.clone())),
        _ => Err(CodecError::WrongNodeType {
            context: "string value",
            expected: "string",
        }),
    }
}

fn decode_coordinate(node: &Value) -> Result<TypedValue, CodecError> {
    let reader = ObjectReader::new(node, "globecoordinate value")?;
    reader.expect_len(COORDINATE_FIELDS.len())?;
    reader.expect_only(COORDINATE_FIELDS)?;
    reader.expect_null("altitude")?;

    Ok(TypedValue::GlobeCoordinate(GlobeCoordinate {
        latitude: reader.read_f64("latitude")?,
        longitude: reader.read_f64("longitude")?,
        precision: reader.read_nullable_f64("precision")?,
        globe: reader.read_str("globe")?.to_string(),
    }))
}

fn decode_entity_id(node: &Value) -> Result<TypedValue, CodecError> {
    let reader = ObjectReader::new(node, "wikibase-entityid value")?;
    reader.expect_len(ENTITY_FIELDS.len())?;
    reader.expect_only(ENTITY_FIELDS)?;

    let entity_type = reader.read_str("entity-type")?;
    let kind = EntityKind::from_entity_type(entity_type).ok_or_else(|| {
        CodecError::UnsupportedValue {
            context: "wikibase-entityid value",
            value: entity_type.to_string(),
        }
    })?;
    let id = Identifier::from_number(kind, reader.read_u64("numeric-id")?)?;

    let text = reader.read_str("id")?;
    if text != id.to_string() {
        return Err(CodecError::FixedValueMismatch {
            context: "wikibase-entityid value",
            field: "id",
            expected: format!("{:?}", id.to_string()),
            found: format!("{:?}", text),
        });
    }
    Ok(TypedValue::EntityId(id))
}

fn decode_time(node: &Value) -> Result<TypedValue, CodecError> {
    let reader = ObjectReader::new(node, "time value")?;
    reader.expect_len(TIME_FIELDS.len())?;
    reader.expect_only(TIME_FIELDS)?;
    reader.expect_int("before", 0)?;
    reader.expect_int("after", 0)?;

    let precision = reader.read_u64("precision")?;
    let precision = u8::try_from(precision).map_err(|_| CodecError::UnsupportedValue {
        context: "time value",
        value: precision.to_string(),
    })?;

    Ok(TypedValue::Time(WdTime {
        time: reader.read_str("time")?.to_string(),
        timezone: reader.read_i64("timezone")?,
        precision,
        calendar_model: reader.read_str("calendarmodel")?.to_string(),
    }))
}

fn decode_opaque(node: &Value, context: &'static str) -> Result<Map<String, Value>, CodecError> {
    node.as_object()
        .cloned()
        .ok_or(CodecError::WrongNodeType { context, expected: "object" })
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a value inside its `{type, value}` envelope.
pub fn encode_datavalue(value: &TypedValue) -> Value {
    ObjectWriter::new()
        .field("type", value.kind().tag())
        .field("value", encode_value(value))
        .finish()
}

/// Encodes the inner value only.
pub fn encode_value(value: &TypedValue) -> Value {
    match value {
        TypedValue::String(s) => Value::String(s.clone()),
        TypedValue::GlobeCoordinate(c) => ObjectWriter::new()
            .field("latitude", normalized_number(c.latitude))
            .field("longitude", normalized_number(c.longitude))
            .field("altitude", Value::Null)
            .field("precision", c.precision.map_or(Value::Null, normalized_number))
            .field("globe", c.globe.as_str())
            .finish(),
        TypedValue::EntityId(id) => ObjectWriter::new()
            .field("id", id.to_string())
            .field("numeric-id", id.number())
            .field("entity-type", id.kind().entity_type())
            .finish(),
        TypedValue::Quantity(v) | TypedValue::MonolingualText(v) => Value::Object(v.clone()),
        TypedValue::Time(t) => ObjectWriter::new()
            .field("time", t.time.as_str())
            .field("timezone", t.timezone)
            .field("before", 0)
            .field("after", 0)
            .field("precision", t.precision)
            .field("calendarmodel", t.calendar_model.as_str())
            .finish(),
    }
}
