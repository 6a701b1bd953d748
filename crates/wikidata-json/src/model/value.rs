//! Typed values carried by `value` snaks.
//!
//! The Wikibase data model defines a closed set of value types; each one
//! has a fixed wire shape (see `codec::value`).

use serde_json::{Map, Value};

use crate::model::{EntityKind, Identifier};
use crate::util::wbtime::{WbTimeParseError, WbTimestamp};

/// Globe entity URI for Earth.
pub const GLOBE_EARTH: &str = "http://www.wikidata.org/entity/Q2";

/// Calendar model URI for the proleptic Gregorian calendar.
pub const CALENDAR_GREGORIAN: &str = "http://www.wikidata.org/entity/Q1985727";

/// Calendar model URI for the proleptic Julian calendar.
pub const CALENDAR_JULIAN: &str = "http://www.wikidata.org/entity/Q1985786";

/// Value type tags (the `type` field of a `datavalue` envelope).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    GlobeCoordinate,
    EntityId,
    Quantity,
    Time,
    MonolingualText,
}

impl ValueKind {
    /// The wire tag for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::GlobeCoordinate => "globecoordinate",
            ValueKind::EntityId => "wikibase-entityid",
            ValueKind::Quantity => "quantity",
            ValueKind::Time => "time",
            ValueKind::MonolingualText => "monolingualtext",
        }
    }

    /// Creates a ValueKind from its wire tag.
    pub fn from_tag(tag: &str) -> Option<ValueKind> {
        match tag {
            "string" => Some(ValueKind::String),
            "globecoordinate" => Some(ValueKind::GlobeCoordinate),
            "wikibase-entityid" => Some(ValueKind::EntityId),
            "quantity" => Some(ValueKind::Quantity),
            "time" => Some(ValueKind::Time),
            "monolingualtext" => Some(ValueKind::MonolingualText),
            _ => None,
        }
    }
}

/// A point on a globe.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeCoordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Precision in degrees; the service may omit it (`null`).
    pub precision: Option<f64>,
    /// Globe entity URI.
    pub globe: String,
}

impl GlobeCoordinate {
    /// Creates a coordinate on Earth.
    pub fn earth(latitude: f64, longitude: f64, precision: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            precision,
            globe: GLOBE_EARTH.to_string(),
        }
    }
}

/// Time precision codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TimePrecision {
    Gigayear = 0,
    HundredMegayears = 1,
    TenMegayears = 2,
    Megayear = 3,
    HundredKiloyears = 4,
    TenKiloyears = 5,
    Millennium = 6,
    Century = 7,
    Decade = 8,
    Year = 9,
    Month = 10,
    Day = 11,
    Hour = 12,
    Minute = 13,
    Second = 14,
}

impl TimePrecision {
    /// Creates a TimePrecision from its wire code.
    pub fn from_u8(v: u8) -> Option<TimePrecision> {
        use TimePrecision::*;
        const ALL: [TimePrecision; 15] = [
            Gigayear, HundredMegayears, TenMegayears, Megayear, HundredKiloyears,
            TenKiloyears, Millennium, Century, Decade, Year, Month, Day, Hour, Minute, Second,
        ];
        ALL.get(v as usize).copied()
    }
}

/// A point in time as stored by Wikibase.
///
/// The `before`/`after` uncertainty fields are always zero on the wire and
/// are therefore not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WdTime {
    /// Time string, e.g. `+2001-12-31T00:00:00Z`.
    pub time: String,
    /// Timezone offset in minutes.
    pub timezone: i64,
    /// Precision code (see [`TimePrecision`]).
    pub precision: u8,
    /// Calendar model entity URI.
    pub calendar_model: String,
}

impl WdTime {
    /// Creates a Gregorian time with UTC offset.
    pub fn gregorian(time: impl Into<String>, precision: TimePrecision) -> Self {
        Self {
            time: time.into(),
            timezone: 0,
            precision: precision as u8,
            calendar_model: CALENDAR_GREGORIAN.to_string(),
        }
    }

    /// The precision as an enum, if the code is known.
    pub fn precision_kind(&self) -> Option<TimePrecision> {
        TimePrecision::from_u8(self.precision)
    }

    /// Splits the time string into its components.
    pub fn timestamp(&self) -> Result<WbTimestamp, WbTimeParseError> {
        WbTimestamp::parse(&self.time)
    }
}

/// A value attached to a `value` snak.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Plain string (also used for external identifiers, URLs, media names).
    String(String),

    /// Geographic coordinate.
    GlobeCoordinate(GlobeCoordinate),

    /// Reference to an item or a property.
    EntityId(Identifier),

    /// Quantity with bounds and unit, carried as-is.
    Quantity(Map<String, Value>),

    /// Point in time.
    Time(WdTime),

    /// Text in a given language, carried as-is.
    MonolingualText(Map<String, Value>),
}

impl TypedValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            TypedValue::String(_) => ValueKind::String,
            TypedValue::GlobeCoordinate(_) => ValueKind::GlobeCoordinate,
            TypedValue::EntityId(_) => ValueKind::EntityId,
            TypedValue::Quantity(_) => ValueKind::Quantity,
            TypedValue::Time(_) => ValueKind::Time,
            TypedValue::MonolingualText(_) => ValueKind::MonolingualText,
        }
    }

    /// Returns the referenced entity for entity-id values.
    pub fn as_entity(&self) -> Option<Identifier> {
        match self {
            TypedValue::EntityId(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the referenced item for entity-id values naming an item.
    pub fn as_item(&self) -> Option<Identifier> {
        self.as_entity().filter(|id| id.kind() == EntityKind::Item)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }
}
