//! Error types for Wikibase entity JSON decoding and configuration loading.

use thiserror::Error;

/// Error families a decode failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// W001: Malformed or out-of-range entity/property identifier
    InvalidIdentifier,
    /// W002: Value type tag outside the six supported kinds
    UnknownValueKind,
    /// W003: Field count, field name, fixed value or order array mismatch
    SchemaViolation,
}

impl ErrorKind {
    /// Returns the error code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidIdentifier => "W001",
            ErrorKind::UnknownValueKind => "W002",
            ErrorKind::SchemaViolation => "W003",
        }
    }
}

/// Error while parsing Wikibase JSON into the entity model.
///
/// Every variant is fatal to the enclosing parse: a failed item parse means
/// the item was not retrieved, never that it was partially populated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    // === W001: Invalid identifier ===
    #[error("[W001] invalid identifier {text:?}: {reason}")]
    InvalidIdentifier { text: String, reason: &'static str },

    // === W002: Unknown value kind ===
    #[error("[W002] unknown value type {kind:?}")]
    UnknownValueKind { kind: String },

    // === W003: Schema violation ===
    #[error("[W003] {context}: expected a JSON {expected}")]
    WrongNodeType {
        context: &'static str,
        expected: &'static str,
    },

    #[error("[W003] {context}: expected {expected} fields, found {found}")]
    FieldCount {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("[W003] {context}: missing field {field:?}")]
    MissingField {
        context: &'static str,
        field: &'static str,
    },

    #[error("[W003] {context}: unexpected field {field:?}")]
    UnexpectedField { context: &'static str, field: String },

    #[error("[W003] {context}: field {field:?} must be {expected}")]
    WrongFieldType {
        context: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("[W003] {context}: field {field:?} must equal {expected}, found {found}")]
    FixedValueMismatch {
        context: &'static str,
        field: &'static str,
        expected: String,
        found: String,
    },

    #[error("[W003] {context}: order array lists {key} which is not in the map")]
    OrphanOrderEntry { context: &'static str, key: String },

    #[error("[W003] {context}: map key {key} is missing from the order array")]
    OrphanMapKey { context: &'static str, key: String },

    #[error("[W003] {context}: order array lists {key} more than once")]
    DuplicateOrderEntry { context: &'static str, key: String },

    #[error("[W003] {context}: snak group for {key} is empty")]
    EmptySnakGroup { context: &'static str, key: String },

    #[error("[W003] {context}: map key {key} does not match {field} {found}")]
    KeyMismatch {
        context: &'static str,
        key: String,
        field: &'static str,
        found: String,
    },

    #[error("[W003] {context}: unsupported value {value:?}")]
    UnsupportedValue { context: &'static str, value: String },

    #[error("[W003] malformed JSON: {0}")]
    MalformedJson(String),

    #[error("[W003] input length {len} exceeds maximum {max}")]
    InputTooLarge { len: usize, max: usize },
}

impl CodecError {
    /// Returns the error family for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::InvalidIdentifier { .. } => ErrorKind::InvalidIdentifier,
            CodecError::UnknownValueKind { .. } => ErrorKind::UnknownValueKind,
            _ => ErrorKind::SchemaViolation,
        }
    }

    /// Returns true if this error belongs to the schema violation family.
    pub fn is_schema_violation(&self) -> bool {
        self.kind() == ErrorKind::SchemaViolation
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::MalformedJson(err.to_string())
    }
}

/// Error while loading or validating client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("configuration field {field} must not be empty")]
    EmptyField { field: &'static str },
}
