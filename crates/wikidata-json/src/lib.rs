//! Strict codec for Wikibase entity JSON.
//!
//! This crate parses item documents returned by the Wikibase entity API
//! (as served by Wikidata) into a typed model and serializes them back to
//! the same wire shape.
//!
//! # Overview
//!
//! The decoder is strict:
//! - **Exact schemas**: every object must carry exactly the fields its type
//!   defines; unknown fields are errors, not ignored
//! - **Consistent ordering**: map/order-array pairs (`snaks`/`snaks-order`,
//!   `qualifiers`/`qualifiers-order`) must index each other exactly
//! - **All or nothing**: a failure anywhere aborts the whole item
//!
//! # Quick Start
//!
//! ```rust
//! use wikidata_json::{Claim, Identifier, Item, Reference};
//!
//! let text = r#"{
//!     "pageid": 138, "ns": 0, "title": "Q42", "lastrevid": 2000,
//!     "modified": "2024-03-01T10:00:00Z", "type": "item", "id": "Q42",
//!     "claims": {}
//! }"#;
//!
//! let mut item = Item::parse(text).unwrap();
//! let p31 = Identifier::property(31).unwrap();
//! let q5 = Identifier::item(5).unwrap();
//!
//! if !item.has_claim_to(&p31, &q5) {
//!     let mut claim = Claim::new_item_statement(item.id, p31, q5);
//!     claim.add_reference(Reference::single_snak(
//!         Identifier::property(143).unwrap(),
//!         Identifier::item(328).unwrap(),
//!     ));
//!     item.add_claim(claim);
//! }
//!
//! let json = item.serialize();
//! let reparsed = Item::parse(&json).unwrap();
//! assert_eq!(reparsed, item);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (Identifier, TypedValue, Snak, Reference, Claim, Item)
//! - [`codec`]: JSON encoding/decoding
//! - [`config`]: Decode options and transport client configuration
//! - [`digest`]: Claim fingerprints for change detection
//! - [`error`]: Error types
//! - [`limits`]: Input size limits
//! - [`util`]: Wikibase time string helpers
//!
//! # Concurrency
//!
//! Parsing and serialization are pure functions of their input. All model
//! types are `Send + Sync`; independent items can be processed on separate
//! threads without coordination.

pub mod codec;
pub mod config;
pub mod digest;
pub mod error;
pub mod limits;
pub mod model;
pub mod util;

// Re-export commonly used types at crate root
pub use config::{ClientConfig, DecodeOptions, OAuthCredentials};
pub use digest::{claims_digest, item_claims_digest};
pub use error::{CodecError, ConfigError, ErrorKind};
pub use model::{
    Claim, ClaimBuilder, ClaimMap, DATATYPE_ITEM, EntityKind, GlobeCoordinate, Identifier, Item,
    OrderedMapping, Rank, Reference, Snak, SnakGroups, SnakType, SnakValue, TermMap, TimePrecision,
    TypedValue, ValueKind, WdTime, new_statement_id,
};
pub use util::{WbTimeParseError, WbTimestamp};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
