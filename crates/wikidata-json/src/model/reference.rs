//! References: provenance records attached to claims.

use serde_json::Value;

use crate::codec;
use crate::config::DecodeOptions;
use crate::error::CodecError;
use crate::model::{Identifier, Snak, SnakGroups};

/// A reference: a hash plus snaks grouped by property.
///
/// Snaks are added with [`Reference::push_snak`] only.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// Content hash assigned by the service; empty for new references.
    pub hash: String,
    snaks: SnakGroups,
}

impl Reference {
    /// Creates an empty reference with no hash.
    pub fn new() -> Self {
        Self {
            hash: String::new(),
            snaks: SnakGroups::new(),
        }
    }

    /// Builds a minimal reference citing `entity` through `property`
    /// (e.g. P143 "imported from Wikimedia project" → Q15180).
    pub fn single_snak(property: Identifier, entity: Identifier) -> Self {
        let mut reference = Self::new();
        reference.push_snak(Snak::value_snak(property, entity));
        reference
    }

    /// Creates a reference from a service hash and its snaks.
    pub fn with_snaks(hash: impl Into<String>, snaks: SnakGroups) -> Self {
        Self {
            hash: hash.into(),
            snaks,
        }
    }

    /// Appends a snak to the group for its property.
    pub fn push_snak(&mut self, snak: Snak) {
        self.snaks.push(snak);
    }

    /// All snak groups, in wire order.
    pub fn snaks(&self) -> &SnakGroups {
        &self.snaks
    }

    /// Snaks for one property, in wire order.
    pub fn snaks_for(&self, property: &Identifier) -> &[Snak] {
        self.snaks.get(property)
    }

    /// Returns true if any snak for `property` references `entity`.
    pub fn cites(&self, property: &Identifier, entity: &Identifier) -> bool {
        self.snaks_for(property)
            .iter()
            .any(|s| s.entity_value().as_ref() == Some(entity))
    }

    /// Decodes a reference from a parsed JSON node.
    pub fn parse(node: &Value) -> Result<Self, CodecError> {
        codec::decode_reference(node)
    }

    /// Decodes a reference from JSON text.
    pub fn parse_str(text: &str) -> Result<Self, CodecError> {
        codec::decode_fragment(text, &DecodeOptions::default(), codec::decode_reference)
    }

    /// Encodes this reference to its wire object.
    pub fn to_json(&self) -> Value {
        codec::encode_reference(self)
    }

    /// Encodes this reference to compact JSON text.
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

impl Default for Reference {
    fn default() -> Self {
        Self::new()
    }
}
