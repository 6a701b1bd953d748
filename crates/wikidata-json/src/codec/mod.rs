//! JSON encoding/decoding for Wikibase entities.
//!
//! Decoders take `serde_json::Value` nodes and validate them field by field;
//! encoders build `Value` objects in the service's field order.

pub mod claim;
pub mod item;
pub mod primitives;
pub mod reference;
pub mod snak;
pub mod value;

use serde_json::Value;

use crate::config::DecodeOptions;
use crate::error::CodecError;

pub use claim::{decode_claim, encode_claim};
pub use item::{decode_item, decode_item_str, encode_claims, encode_item};
pub use primitives::{ObjectReader, ObjectWriter, normalized_number};
pub use reference::{decode_reference, encode_reference};
pub use snak::{decode_snak, decode_snak_groups, encode_snak, encode_snak_groups};
pub use value::{decode_datavalue, decode_value, encode_datavalue, encode_value};

/// Parses a standalone snak/reference/claim fragment and decodes it.
pub fn decode_fragment<T>(
    text: &str,
    options: &DecodeOptions,
    decode: impl FnOnce(&Value) -> Result<T, CodecError>,
) -> Result<T, CodecError> {
    let node = primitives::parse_document(text, options.max_fragment_bytes)?;
    decode(&node)
}
