//! Items: entity records with their claims.

use serde_json::Value;

use crate::codec;
use crate::config::DecodeOptions;
use crate::error::CodecError;
use crate::model::{Claim, Identifier, OrderedMapping};

/// Language code → text, in wire order. Used for labels and descriptions.
pub type TermMap = OrderedMapping<String, String>;

/// Property → claims for that property, in wire order.
///
/// Claims are only added through [`ClaimMap::push`], which files each one
/// under its main snak's property.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClaimMap {
    claims: OrderedMapping<Identifier, Vec<Claim>>,
}

impl ClaimMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            claims: OrderedMapping::with_capacity(capacity),
        }
    }

    /// Appends a claim to the list for its main snak's property.
    pub fn push(&mut self, claim: Claim) {
        self.claims.get_or_insert_with(claim.property(), Vec::new).push(claim);
    }

    /// Opens an empty claim list for `property` if none exists yet.
    pub(crate) fn open(&mut self, property: Identifier) {
        self.claims.get_or_insert_with(property, Vec::new);
    }

    /// Claims for one property, in wire order.
    pub fn get(&self, property: &Identifier) -> &[Claim] {
        self.claims.get(property).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Properties in wire order.
    pub fn properties(&self) -> impl ExactSizeIterator<Item = &Identifier> {
        self.claims.keys()
    }

    /// Property/claims pairs in wire order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Identifier, &[Claim])> {
        self.claims.iter().map(|(p, claims)| (p, claims.as_slice()))
    }

    /// All claims, property by property.
    pub fn claims(&self) -> impl Iterator<Item = &Claim> {
        self.claims.values().flatten()
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Total number of claims across all properties.
    pub fn claim_count(&self) -> usize {
        self.claims.values().map(Vec::len).sum()
    }
}

impl FromIterator<Claim> for ClaimMap {
    fn from_iter<I: IntoIterator<Item = Claim>>(iter: I) -> Self {
        let mut claims = Self::new();
        for claim in iter {
            claims.push(claim);
        }
        claims
    }
}

/// An item entity as returned by the entity API.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Item identifier; also the page title.
    pub id: Identifier,
    pub page_id: u64,
    pub last_rev_id: u64,
    /// Last-modified timestamp, e.g. `2024-01-31T12:00:00Z`.
    pub modified: String,
    pub labels: Option<TermMap>,
    pub descriptions: Option<TermMap>,
    /// Aliases block, carried verbatim.
    pub aliases: Option<Value>,
    claims: ClaimMap,
    /// Sitelinks block, carried verbatim.
    pub sitelinks: Option<Value>,
}

impl Item {
    /// Creates an item with no claims and no term or sitelink blocks.
    pub fn new(
        id: Identifier,
        page_id: u64,
        last_rev_id: u64,
        modified: impl Into<String>,
    ) -> Self {
        Self {
            id,
            page_id,
            last_rev_id,
            modified: modified.into(),
            labels: None,
            descriptions: None,
            aliases: None,
            claims: ClaimMap::new(),
            sitelinks: None,
        }
    }

    /// Parses an item from JSON text with default limits.
    pub fn parse(text: &str) -> Result<Self, CodecError> {
        Self::parse_with_options(text, &DecodeOptions::default())
    }

    /// Parses an item from JSON text.
    pub fn parse_with_options(text: &str, options: &DecodeOptions) -> Result<Self, CodecError> {
        codec::decode_item_str(text, options)
    }

    /// Decodes an item from a parsed JSON node.
    pub fn from_json(node: &Value) -> Result<Self, CodecError> {
        codec::decode_item(node)
    }

    /// Encodes this item to its wire object.
    pub fn to_json(&self) -> Value {
        codec::encode_item(self)
    }

    /// Encodes this item to compact JSON text.
    pub fn serialize(&self) -> String {
        self.to_json().to_string()
    }

    /// Replaces the claims, keeping everything else.
    pub fn with_claims(mut self, claims: ClaimMap) -> Self {
        self.claims = claims;
        self
    }

    /// All claims, grouped by property.
    pub fn claims(&self) -> &ClaimMap {
        &self.claims
    }

    /// Claims for one property, in wire order.
    pub fn claims_for(&self, property: &Identifier) -> &[Claim] {
        self.claims.get(property)
    }

    /// Looks up a claim by its GUID.
    pub fn claim_by_id(&self, id: &str) -> Option<&Claim> {
        self.claims.claims().find(|c| c.id == id)
    }

    /// Returns true if some claim for `property` points at `entity`.
    pub fn has_claim_to(&self, property: &Identifier, entity: &Identifier) -> bool {
        self.claims_for(property)
            .iter()
            .any(|c| c.target_entity().as_ref() == Some(entity))
    }

    /// Appends a claim to the list for its main snak's property.
    pub fn add_claim(&mut self, claim: Claim) {
        self.claims.push(claim);
    }

    /// Total number of claims across all properties.
    pub fn claim_count(&self) -> usize {
        self.claims.claim_count()
    }

    /// Label in `language`, if present.
    pub fn label(&self, language: &str) -> Option<&str> {
        term(self.labels.as_ref(), language)
    }

    /// Description in `language`, if present.
    pub fn description(&self, language: &str) -> Option<&str> {
        term(self.descriptions.as_ref(), language)
    }
}

fn term<'a>(terms: Option<&'a TermMap>, language: &str) -> Option<&'a str> {
    terms?.get(language).map(String::as_str)
}
