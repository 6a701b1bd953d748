//! Reference encoding/decoding.
//!
//! ```text
//! {"hash": "...", "snaks": {P…: [snak, ...], ...}, "snaks-order": [P…, ...]}
//! ```

use serde_json::Value;

use crate::codec::primitives::{ObjectReader, ObjectWriter};
use crate::codec::snak::{decode_snak_groups, encode_snak_groups};
use crate::error::CodecError;
use crate::model::Reference;

const REFERENCE_FIELDS: &[&str] = &["hash", "snaks", "snaks-order"];

/// Decodes one reference.
pub fn decode_reference(node: &Value) -> Result<Reference, CodecError> {
    let reader = ObjectReader::new(node, "reference")?;
    reader.expect_len(REFERENCE_FIELDS.len())?;
    reader.expect_only(REFERENCE_FIELDS)?;

    let order = reader.read_array("snaks-order")?;
    let snaks = reader.read_object("snaks", "reference snaks")?;

    let hash = reader.read_str("hash")?;
    let snaks = decode_snak_groups(snaks, order, "reference snaks")?;
    Ok(Reference::with_snaks(hash, snaks))
}

/// Encodes one reference.
pub fn encode_reference(reference: &Reference) -> Value {
    let (snaks, order) = encode_snak_groups(reference.snaks());
    ObjectWriter::new()
        .field("hash", reference.hash.as_str())
        .field("snaks", snaks)
        .field("snaks-order", order)
        .finish()
}
