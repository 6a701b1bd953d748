//! Item encoding/decoding.
//!
//! An item document has eight fixed fields:
//!
//! ```text
//! pageid, ns (= 0), title (= id), lastrevid, modified, type (= "item"), id, claims
//! ```
//!
//! plus the optional term and sitelink blocks (`labels`, `descriptions`,
//! `aliases`, `sitelinks`) when they were requested from the service.

use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::codec::claim::{decode_claim, encode_claim};
use crate::codec::primitives::{ObjectReader, ObjectWriter, parse_document};
use crate::config::DecodeOptions;
use crate::error::CodecError;
use crate::model::{ClaimMap, Identifier, Item, TermMap};

const FIXED_FIELDS: &[&str] = &[
    "pageid",
    "ns",
    "title",
    "lastrevid",
    "modified",
    "type",
    "id",
    "claims",
];
const PASSTHROUGH_FIELDS: &[&str] = &["labels", "descriptions", "aliases", "sitelinks"];
const TERM_FIELDS: &[&str] = &["language", "value"];

/// Main (article) namespace, where items live.
const ITEM_NAMESPACE: i64 = 0;

const ITEM_TYPE: &str = "item";

// =============================================================================
// DECODING
// =============================================================================

/// Parses and decodes an item from JSON text.
pub fn decode_item_str(text: &str, options: &DecodeOptions) -> Result<Item, CodecError> {
    let node = parse_document(text, options.max_entity_bytes).inspect_err(|e| {
        warn!(target: "wikidata_json", error = %e, "rejected entity document");
    })?;
    decode_item(&node)
}

/// Decodes an item from a parsed JSON node.
///
/// Any failure aborts the whole item; no partially decoded item is returned.
pub fn decode_item(node: &Value) -> Result<Item, CodecError> {
    decode_item_inner(node).inspect_err(|e| {
        let id = node.get("id").and_then(Value::as_str).unwrap_or("<unknown>");
        warn!(target: "wikidata_json", item = id, error = %e, "rejected item");
    })
}

fn decode_item_inner(node: &Value) -> Result<Item, CodecError> {
    let reader = ObjectReader::new(node, "item")?;

    // Envelope checks happen before any claim is looked at.
    let passthrough = PASSTHROUGH_FIELDS.iter().filter(|f| reader.contains(f)).count();
    let known = |k: &str| FIXED_FIELDS.contains(&k) || PASSTHROUGH_FIELDS.contains(&k);
    if let Some((field, _)) = reader.entries().find(|(k, _)| !known(k.as_str())) {
        return Err(CodecError::UnexpectedField {
            context: "item",
            field: field.clone(),
        });
    }
    let fixed = reader.len() - passthrough;
    if fixed != FIXED_FIELDS.len() {
        return Err(CodecError::FieldCount {
            context: "item",
            expected: FIXED_FIELDS.len(),
            found: fixed,
        });
    }

    reader.expect_int("ns", ITEM_NAMESPACE)?;
    reader.expect_str("type", ITEM_TYPE)?;
    let id = Identifier::parse_item(reader.read_str("id")?)?;
    reader.expect_str("title", &id.to_string())?;

    let page_id = reader.read_u64("pageid")?;
    let last_rev_id = reader.read_u64("lastrevid")?;
    let modified = reader.read_str("modified")?.to_string();

    let labels = decode_optional_terms(&reader, "labels", "label")?;
    let descriptions = decode_optional_terms(&reader, "descriptions", "description")?;
    let aliases = reader.optional("aliases").cloned();
    let sitelinks = reader.optional("sitelinks").cloned();

    let claims = decode_claims(reader.read_object("claims", "claims")?)?;

    let mut item = Item::new(id, page_id, last_rev_id, modified).with_claims(claims);
    item.labels = labels;
    item.descriptions = descriptions;
    item.aliases = aliases;
    item.sitelinks = sitelinks;
    debug!(
        target: "wikidata_json",
        item = %item.id,
        revision = item.last_rev_id,
        properties = item.claims().len(),
        claims = item.claim_count(),
        "decoded item"
    );
    Ok(item)
}

fn decode_claims(reader: ObjectReader<'_>) -> Result<ClaimMap, CodecError> {
    let mut claims = ClaimMap::with_capacity(reader.len());
    for (key, list) in reader.entries() {
        let property = Identifier::parse_property(key)?;
        let nodes = list.as_array().ok_or(CodecError::WrongNodeType {
            context: "claims",
            expected: "array",
        })?;

        claims.open(property);
        for node in nodes {
            let claim = decode_claim(node)?;
            if claim.property() != property {
                return Err(CodecError::KeyMismatch {
                    context: "claims",
                    key: key.clone(),
                    field: "mainsnak property",
                    found: claim.property().to_string(),
                });
            }
            trace!(target: "wikidata_json", claim = %claim.id, "decoded claim");
            claims.push(claim);
        }
    }
    Ok(claims)
}

fn decode_optional_terms(
    reader: &ObjectReader<'_>,
    field: &'static str,
    context: &'static str,
) -> Result<Option<TermMap>, CodecError> {
    if !reader.contains(field) {
        return Ok(None);
    }
    let block = reader.read_object(field, context)?;

    let mut terms = TermMap::with_capacity(block.len());
    for (language, node) in block.entries() {
        let term = ObjectReader::new(node, context)?;
        term.expect_len(TERM_FIELDS.len())?;
        term.expect_only(TERM_FIELDS)?;
        let declared = term.read_str("language")?;
        if declared != language {
            return Err(CodecError::KeyMismatch {
                context,
                key: language.clone(),
                field: "language",
                found: declared.to_string(),
            });
        }
        terms.insert(language.clone(), term.read_str("value")?.to_string());
    }
    Ok(Some(terms))
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes an item to its wire object.
pub fn encode_item(item: &Item) -> Value {
    let value = ObjectWriter::new()
        .field("pageid", item.page_id)
        .field("ns", ITEM_NAMESPACE)
        .field("title", item.id.to_string())
        .field("lastrevid", item.last_rev_id)
        .field("modified", item.modified.as_str())
        .field("type", ITEM_TYPE)
        .field("id", item.id.to_string())
        .optional_field("labels", item.labels.as_ref().map(encode_terms))
        .optional_field("descriptions", item.descriptions.as_ref().map(encode_terms))
        .optional_field("aliases", item.aliases.clone())
        .field("claims", encode_claims(item.claims()))
        .optional_field("sitelinks", item.sitelinks.clone())
        .finish();
    debug!(
        target: "wikidata_json",
        item = %item.id,
        claims = item.claim_count(),
        "encoded item"
    );
    value
}

/// Encodes the claims block: property → list of claims.
pub fn encode_claims(claims: &ClaimMap) -> Value {
    let mut map = Map::with_capacity(claims.len());
    for (property, list) in claims.iter() {
        map.insert(
            property.to_string(),
            Value::Array(list.iter().map(encode_claim).collect()),
        );
    }
    Value::Object(map)
}

/// Re-shapes a term map into `{lang: {language, value}}`.
fn encode_terms(terms: &TermMap) -> Value {
    let mut map = Map::with_capacity(terms.len());
    for (language, value) in terms {
        map.insert(
            language.clone(),
            ObjectWriter::new()
                .field("language", language.as_str())
                .field("value", value.as_str())
                .finish(),
        );
    }
    Value::Object(map)
}
