//! Data model types for Wikibase entities.
//!
//! This module contains the in-memory form of an entity document:
//! - Identifiers (`Q…` items, `P…` properties)
//! - The insertion-ordered mapping behind every map/order-array pair
//! - Typed values, snaks, references, claims and items
//! - A builder for new statements

pub mod builder;
pub mod claim;
pub mod id;
pub mod item;
pub mod ordered;
pub mod reference;
pub mod snak;
pub mod value;

pub use builder::ClaimBuilder;
pub use claim::{Claim, Rank, new_statement_id};
pub use id::{EntityKind, Identifier};
pub use item::{ClaimMap, Item, TermMap};
pub use ordered::OrderedMapping;
pub use reference::Reference;
pub use snak::{DATATYPE_ITEM, Snak, SnakGroups, SnakType, SnakValue};
pub use value::{
    CALENDAR_GREGORIAN, CALENDAR_JULIAN, GLOBE_EARTH, GlobeCoordinate, TimePrecision, TypedValue,
    ValueKind, WdTime,
};
