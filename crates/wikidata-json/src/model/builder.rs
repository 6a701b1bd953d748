//! Builder API for assembling new statements.
//!
//! # Example
//!
//! ```rust
//! use wikidata_json::{ClaimBuilder, Identifier, Rank};
//!
//! let q42 = Identifier::item(42).unwrap();
//! let p31 = Identifier::property(31).unwrap();
//! let q5 = Identifier::item(5).unwrap();
//!
//! let claim = ClaimBuilder::item_statement(q42, p31, q5)
//!     .rank(Rank::Preferred)
//!     .cite(Identifier::property(143).unwrap(), Identifier::item(328).unwrap())
//!     .build();
//!
//! assert!(claim.id.starts_with("Q42$"));
//! assert_eq!(claim.references().len(), 1);
//! ```

use crate::model::claim::new_statement_id;
use crate::model::{Claim, Identifier, Rank, Reference, Snak, SnakGroups, TypedValue};

/// Builder for a [`Claim`].
#[derive(Debug, Clone)]
pub struct ClaimBuilder {
    subject: Identifier,
    id: Option<String>,
    rank: Rank,
    main_snak: Snak,
    qualifiers: Option<SnakGroups>,
    references: Option<Vec<Reference>>,
}

impl ClaimBuilder {
    /// Starts a claim on `subject` with the given main snak.
    pub fn new(subject: Identifier, main_snak: Snak) -> Self {
        Self {
            subject,
            id: None,
            rank: Rank::Normal,
            main_snak,
            qualifiers: None,
            references: None,
        }
    }

    /// Starts a claim `subject` → `property` → `entity`.
    pub fn item_statement(subject: Identifier, property: Identifier, entity: Identifier) -> Self {
        Self::new(subject, Snak::value_snak(property, entity))
    }

    /// Uses an explicit statement GUID instead of generating one.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn rank(mut self, rank: Rank) -> Self {
        self.rank = rank;
        self
    }

    /// Adds a qualifier snak.
    pub fn qualifier(mut self, snak: Snak) -> Self {
        self.qualifiers.get_or_insert_with(SnakGroups::new).push(snak);
        self
    }

    /// Adds a qualifier with an arbitrary value.
    pub fn qualifier_value(
        self,
        property: Identifier,
        datatype: impl Into<String>,
        value: TypedValue,
    ) -> Self {
        self.qualifier(Snak::with_value(property, datatype, value))
    }

    /// Adds a reference.
    pub fn reference(mut self, reference: Reference) -> Self {
        self.references.get_or_insert_with(Vec::new).push(reference);
        self
    }

    /// Adds a single-snak reference citing `entity` through `property`.
    pub fn cite(self, property: Identifier, entity: Identifier) -> Self {
        self.reference(Reference::single_snak(property, entity))
    }

    /// Builds the claim, generating a GUID if none was set.
    pub fn build(self) -> Claim {
        Claim {
            id: self.id.unwrap_or_else(|| new_statement_id(self.subject)),
            rank: self.rank,
            main_snak: self.main_snak,
            qualifiers: self.qualifiers,
            references: self.references,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TimePrecision, WdTime};

    #[test]
    fn test_builder_defaults() {
        let q42 = Identifier::item(42).unwrap();
        let p31 = Identifier::property(31).unwrap();
        let claim = ClaimBuilder::item_statement(q42, p31, Identifier::item(5).unwrap()).build();
        assert!(claim.id.starts_with("Q42$"));
        assert_eq!(claim.rank, Rank::Normal);
        assert!(claim.qualifiers.is_none());
        assert!(claim.references.is_none());
    }

    #[test]
    fn test_builder_full() {
        let q42 = Identifier::item(42).unwrap();
        let p39 = Identifier::property(39).unwrap();
        let p580 = Identifier::property(580).unwrap();
        let p143 = Identifier::property(143).unwrap();

        let claim = ClaimBuilder::item_statement(q42, p39, Identifier::item(30185).unwrap())
            .id("Q42$00000000-0000-0000-0000-000000000001")
            .rank(Rank::Preferred)
            .qualifier_value(
                p580,
                "time",
                TypedValue::Time(WdTime::gregorian("+1990-01-01T00:00:00Z", TimePrecision::Year)),
            )
            .cite(p143, Identifier::item(328).unwrap())
            .cite(p143, Identifier::item(15180).unwrap())
            .build();

        assert_eq!(claim.id, "Q42$00000000-0000-0000-0000-000000000001");
        assert_eq!(claim.rank, Rank::Preferred);
        assert_eq!(claim.qualifiers_for(&p580).len(), 1);
        assert_eq!(claim.references().len(), 2);
        assert!(claim.references()[1].cites(&p143, &Identifier::item(15180).unwrap()));
    }
}
