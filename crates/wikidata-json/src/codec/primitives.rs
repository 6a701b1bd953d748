//! Primitive helpers for walking and building Wikibase JSON objects.
//!
//! [`ObjectReader`] wraps a JSON object and provides typed field accessors
//! that fail with a schema violation naming the object being decoded.
//! [`ObjectWriter`] builds objects in wire field order.

use serde_json::{Map, Number, Value};

use crate::error::CodecError;

// =============================================================================
// DECODING
// =============================================================================

/// Reader over one JSON object.
#[derive(Debug, Clone, Copy)]
pub struct ObjectReader<'a> {
    map: &'a Map<String, Value>,
    context: &'static str,
}

impl<'a> ObjectReader<'a> {
    /// Wraps `node`, which must be a JSON object.
    pub fn new(node: &'a Value, context: &'static str) -> Result<Self, CodecError> {
        match node {
            Value::Object(map) => Ok(Self { map, context }),
            _ => Err(CodecError::WrongNodeType { context, expected: "object" }),
        }
    }

    /// The context name used in errors.
    pub fn context(&self) -> &'static str {
        self.context
    }

    /// Number of fields in the object.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Fails unless the object has exactly `expected` fields.
    pub fn expect_len(&self, expected: usize) -> Result<(), CodecError> {
        if self.map.len() != expected {
            return Err(CodecError::FieldCount {
                context: self.context,
                expected,
                found: self.map.len(),
            });
        }
        Ok(())
    }

    /// Fails on the first field name not in `allowed`.
    pub fn expect_only(&self, allowed: &[&str]) -> Result<(), CodecError> {
        match self.map.keys().find(|k| !allowed.contains(&k.as_str())) {
            Some(field) => Err(CodecError::UnexpectedField {
                context: self.context,
                field: field.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.map.contains_key(field)
    }

    /// Field/value pairs in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a String, &'a Value)> + use<'a> {
        self.map.iter()
    }

    /// Returns the field if present.
    pub fn optional(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field)
    }

    /// Returns the field or fails with a missing-field error.
    pub fn required(&self, field: &'static str) -> Result<&'a Value, CodecError> {
        self.map.get(field).ok_or(CodecError::MissingField {
            context: self.context,
            field,
        })
    }

    fn wrong_type(&self, field: &'static str, expected: &'static str) -> CodecError {
        CodecError::WrongFieldType {
            context: self.context,
            field,
            expected,
        }
    }

    /// Reads a required string field.
    pub fn read_str(&self, field: &'static str) -> Result<&'a str, CodecError> {
        self.required(field)?
            .as_str()
            .ok_or_else(|| self.wrong_type(field, "a string"))
    }

    /// Reads a required non-negative integer field.
    pub fn read_u64(&self, field: &'static str) -> Result<u64, CodecError> {
        self.required(field)?
            .as_u64()
            .ok_or_else(|| self.wrong_type(field, "a non-negative integer"))
    }

    /// Reads a required integer field.
    pub fn read_i64(&self, field: &'static str) -> Result<i64, CodecError> {
        self.required(field)?
            .as_i64()
            .ok_or_else(|| self.wrong_type(field, "an integer"))
    }

    /// Reads a required numeric field (integer or decimal).
    pub fn read_f64(&self, field: &'static str) -> Result<f64, CodecError> {
        self.required(field)?
            .as_f64()
            .ok_or_else(|| self.wrong_type(field, "a number"))
    }

    /// Reads a required field that may be a number or `null`.
    pub fn read_nullable_f64(&self, field: &'static str) -> Result<Option<f64>, CodecError> {
        match self.required(field)? {
            Value::Null => Ok(None),
            v => v
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.wrong_type(field, "a number or null")),
        }
    }

    /// Reads a required array field.
    pub fn read_array(&self, field: &'static str) -> Result<&'a Vec<Value>, CodecError> {
        self.required(field)?
            .as_array()
            .ok_or_else(|| self.wrong_type(field, "an array"))
    }

    /// Reads a required object field as a nested reader.
    pub fn read_object(
        &self,
        field: &'static str,
        context: &'static str,
    ) -> Result<ObjectReader<'a>, CodecError> {
        let node = self.required(field)?;
        if !node.is_object() {
            return Err(self.wrong_type(field, "an object"));
        }
        ObjectReader::new(node, context)
    }

    /// Fails unless the string field equals `expected`.
    pub fn expect_str(&self, field: &'static str, expected: &str) -> Result<(), CodecError> {
        let found = self.read_str(field)?;
        if found != expected {
            return Err(CodecError::FixedValueMismatch {
                context: self.context,
                field,
                expected: format!("{:?}", expected),
                found: format!("{:?}", found),
            });
        }
        Ok(())
    }

    /// Fails unless the field is the integer `expected`.
    pub fn expect_int(&self, field: &'static str, expected: i64) -> Result<(), CodecError> {
        let node = self.required(field)?;
        if node.as_i64() != Some(expected) {
            return Err(CodecError::FixedValueMismatch {
                context: self.context,
                field,
                expected: expected.to_string(),
                found: node.to_string(),
            });
        }
        Ok(())
    }

    /// Fails unless the field is present and `null`.
    pub fn expect_null(&self, field: &'static str) -> Result<(), CodecError> {
        let node = self.required(field)?;
        if !node.is_null() {
            return Err(CodecError::FixedValueMismatch {
                context: self.context,
                field,
                expected: "null".to_string(),
                found: node.to_string(),
            });
        }
        Ok(())
    }
}

/// Reads a JSON array of strings.
pub fn read_string_array<'a>(
    items: &'a [Value],
    context: &'static str,
) -> Result<Vec<&'a str>, CodecError> {
    items
        .iter()
        .map(|v| {
            v.as_str()
                .ok_or(CodecError::WrongNodeType { context, expected: "string" })
        })
        .collect()
}

/// Parses JSON text after checking it against a length limit.
pub fn parse_document(text: &str, max_len: usize) -> Result<Value, CodecError> {
    if text.len() > max_len {
        return Err(CodecError::InputTooLarge {
            len: text.len(),
            max: max_len,
        });
    }
    Ok(serde_json::from_str(text)?)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Builder for a JSON object; fields are emitted in insertion order.
#[derive(Debug, Default)]
pub struct ObjectWriter {
    map: Map<String, Value>,
}

impl ObjectWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.map.insert(name.to_string(), value.into());
        self
    }

    /// Appends a field only when `value` is `Some`.
    pub fn optional_field(self, name: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.field(name, v),
            None => self,
        }
    }

    pub fn finish(self) -> Value {
        Value::Object(self.map)
    }
}

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Encodes a float the way the entity service does: integral values become
/// JSON integers, everything else stays a decimal.
///
/// Non-finite values cannot be represented in JSON and become `null`.
pub fn normalized_number(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INT {
        return Value::Number(Number::from(value as i64));
    }
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_normalized_number() {
        assert_eq!(normalized_number(51.0).to_string(), "51");
        assert_eq!(normalized_number(51.5).to_string(), "51.5");
        assert_eq!(normalized_number(-0.0).to_string(), "0");
        assert_eq!(normalized_number(-122.0).to_string(), "-122");
        assert_eq!(normalized_number(0.000277778).to_string(), "0.000277778");
        assert_eq!(normalized_number(1e300).to_string(), "1e300");
        assert!(normalized_number(f64::NAN).is_null());
    }

    #[test]
    fn test_reader_field_access() {
        let node = json!({"a": "x", "n": 3, "f": 1.5, "z": null, "arr": [1]});
        let r = ObjectReader::new(&node, "test").unwrap();
        assert_eq!(r.len(), 5);
        assert_eq!(r.read_str("a").unwrap(), "x");
        assert_eq!(r.read_u64("n").unwrap(), 3);
        assert_eq!(r.read_f64("n").unwrap(), 3.0);
        assert_eq!(r.read_f64("f").unwrap(), 1.5);
        assert_eq!(r.read_nullable_f64("z").unwrap(), None);
        assert_eq!(r.read_array("arr").unwrap().len(), 1);

        assert!(matches!(r.read_str("n"), Err(CodecError::WrongFieldType { field: "n", .. })));
        assert!(matches!(r.read_str("missing"), Err(CodecError::MissingField { .. })));
        assert!(r.expect_len(4).is_err());
        assert!(r.expect_only(&["a", "n", "f", "z"]).is_err());
        assert!(r.expect_only(&["a", "n", "f", "z", "arr"]).is_ok());
    }

    #[test]
    fn test_reader_fixed_values() {
        let node = json!({"type": "item", "ns": 0, "altitude": null, "before": 1});
        let r = ObjectReader::new(&node, "test").unwrap();
        assert!(r.expect_str("type", "item").is_ok());
        assert!(r.expect_str("type", "property").is_err());
        assert!(r.expect_int("ns", 0).is_ok());
        assert!(r.expect_int("before", 0).is_err());
        assert!(r.expect_null("altitude").is_ok());
        assert!(r.expect_null("ns").is_err());
    }

    #[test]
    fn test_reader_rejects_non_object() {
        let node = json!([1, 2]);
        assert!(matches!(
            ObjectReader::new(&node, "test"),
            Err(CodecError::WrongNodeType { expected: "object", .. })
        ));
    }

    #[test]
    fn test_writer_keeps_field_order() {
        let v = ObjectWriter::new()
            .field("z", 1)
            .field("a", "x")
            .optional_field("skip", None::<i64>)
            .optional_field("keep", Some(true))
            .finish();
        assert_eq!(v.to_string(), r#"{"z":1,"a":"x","keep":true}"#);
    }

    #[test]
    fn test_parse_document_limit() {
        assert!(parse_document("{}", 2).is_ok());
        assert!(matches!(
            parse_document("{ }", 2),
            Err(CodecError::InputTooLarge { len: 3, max: 2 })
        ));
        assert!(matches!(parse_document("{", 10), Err(CodecError::MalformedJson(_))));
    }
}
