//! Closed catalog of relationship types and their algebraic properties.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SlicesError;

/// Typed link between two slices. Identifiers are shared with the frontmatter
/// `rel` field, e.g. `depends_on`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    DependsOn,
    Blocks,
    EvidenceFor,
    EvidenceAgainst,
    Supersedes,
    SupersededBy,
    Parent,
    Child,
    PartOf,
    HasPart,
    IsA,
    TypeOf,
    DerivedFrom,
    SourceOf,
    SeeAlso,
    RoutesTo,
    RoutedFrom,
}

/// Algebraic properties of a relationship type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelationshipProperties {
    pub inverse: RelationshipType,
    /// `a r b` and `b r c` imply `a r c`.
    pub transitive: bool,
    /// `a r b` implies `b r a`.
    pub symmetric: bool,
}

impl RelationshipType {
    /// Every relationship type, in catalog order.
    pub const ALL: [RelationshipType; 17] = [
        RelationshipType::DependsOn,
        RelationshipType::Blocks,
        RelationshipType::EvidenceFor,
        RelationshipType::EvidenceAgainst,
        RelationshipType::Supersedes,
        RelationshipType::SupersededBy,
        RelationshipType::Parent,
        RelationshipType::Child,
        RelationshipType::PartOf,
        RelationshipType::HasPart,
        RelationshipType::IsA,
        RelationshipType::TypeOf,
        RelationshipType::DerivedFrom,
        RelationshipType::SourceOf,
        RelationshipType::SeeAlso,
        RelationshipType::RoutesTo,
        RelationshipType::RoutedFrom,
    ];

    /// Look up the properties of this relationship type.
    pub const fn properties(self) -> RelationshipProperties {
        use RelationshipType::*;

        let (inverse, transitive, symmetric) = match self {
            DependsOn => (Blocks, true, false),
            Blocks => (DependsOn, true, false),
            EvidenceFor => (EvidenceAgainst, false, false),
            EvidenceAgainst => (EvidenceFor, false, false),
            Supersedes => (SupersededBy, true, false),
            SupersededBy => (Supersedes, true, false),
            // Direct parent/child links do not compose into ancestry.
            Parent => (Child, false, false),
            Child => (Parent, false, false),
            PartOf => (HasPart, true, false),
            HasPart => (PartOf, true, false),
            IsA => (TypeOf, true, false),
            TypeOf => (IsA, true, false),
            DerivedFrom => (SourceOf, true, false),
            SourceOf => (DerivedFrom, true, false),
            SeeAlso => (SeeAlso, false, true),
            RoutesTo => (RoutedFrom, true, false),
            RoutedFrom => (RoutesTo, true, false),
        };

        RelationshipProperties {
            inverse,
            transitive,
            symmetric,
        }
    }

    pub const fn inverse(self) -> RelationshipType {
        self.properties().inverse
    }

    pub const fn is_transitive(self) -> bool {
        self.properties().transitive
    }

    pub const fn is_symmetric(self) -> bool {
        self.properties().symmetric
    }

    /// All transitive relationship types, in catalog order.
    pub fn transitive() -> impl Iterator<Item = RelationshipType> {
        Self::ALL.into_iter().filter(|rel| rel.is_transitive())
    }

    /// Identifier as written in frontmatter.
    pub const fn as_str(self) -> &'static str {
        use RelationshipType::*;

        match self {
            DependsOn => "depends_on",
            Blocks => "blocks",
            EvidenceFor => "evidence_for",
            EvidenceAgainst => "evidence_against",
            Supersedes => "supersedes",
            SupersededBy => "superseded_by",
            Parent => "parent",
            Child => "child",
            PartOf => "part_of",
            HasPart => "has_part",
            IsA => "is_a",
            TypeOf => "type_of",
            DerivedFrom => "derived_from",
            SourceOf => "source_of",
            SeeAlso => "see_also",
            RoutesTo => "routes_to",
            RoutedFrom => "routed_from",
        }
    }
}

/// Free-function form of [`RelationshipType::properties`].
pub fn properties(rel: RelationshipType) -> RelationshipProperties {
    rel.properties()
}

/// Free-function form of [`RelationshipType::inverse`].
pub fn inverse(rel: RelationshipType) -> RelationshipType {
    rel.inverse()
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipType {
    type Err = SlicesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rel| rel.as_str() == s)
            .ok_or_else(|| {
                let valid = Self::ALL
                    .iter()
                    .map(|rel| rel.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                SlicesError::InvalidInput(format!(
                    "Invalid relationship type: {}. Valid types: {}",
                    s, valid
                ))
            })
    }
}
