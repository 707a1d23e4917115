use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::VeilError;

/// Entity category attached to detected spans and carried through
/// placeholders, mapping entries, and the legend.
///
/// Serialized as the uppercase tag string (`"PERSON"`, `"IBAN"`, ...) so
/// mapping artifacts stay readable and stable across enum reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EntityKind {
    Person,
    Org,
    Place,
    Street,
    Road,
    Address,
    Vehicle,
    Phone,
    Email,
    Iban,
    NationalId,
    BirthDate,
}

impl EntityKind {
    /// Number of entity kinds.
    pub const COUNT: usize = 12;

    /// All kinds in display order (the order the legend reports them in).
    pub const ALL: [EntityKind; Self::COUNT] = [
        EntityKind::Person,
        EntityKind::Org,
        EntityKind::Place,
        EntityKind::Street,
        EntityKind::Road,
        EntityKind::Address,
        EntityKind::Vehicle,
        EntityKind::Phone,
        EntityKind::Email,
        EntityKind::Iban,
        EntityKind::NationalId,
        EntityKind::BirthDate,
    ];

    /// Uppercase tag used inside placeholder tokens (`PERSON_3`, `IBAN_1`).
    pub fn tag(self) -> &'static str {
        match self {
            EntityKind::Person => "PERSON",
            EntityKind::Org => "ORG",
            EntityKind::Place => "PLACE",
            EntityKind::Street => "STREET",
            EntityKind::Road => "ROAD",
            EntityKind::Address => "ADDRESS",
            EntityKind::Vehicle => "VEHICLE",
            EntityKind::Phone => "PHONE",
            EntityKind::Email => "EMAIL",
            EntityKind::Iban => "IBAN",
            EntityKind::NationalId => "ID",
            EntityKind::BirthDate => "DOB",
        }
    }

    /// Singular human label.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Person => "person name",
            EntityKind::Org => "organization",
            EntityKind::Place => "location",
            EntityKind::Street => "street name",
            EntityKind::Road => "road number",
            EntityKind::Address => "address",
            EntityKind::Vehicle => "vehicle",
            EntityKind::Phone => "phone number",
            EntityKind::Email => "email address",
            EntityKind::Iban => "bank account",
            EntityKind::NationalId => "national ID number",
            EntityKind::BirthDate => "date of birth",
        }
    }

    /// Plural human label, used by the legend.
    pub fn label_plural(self) -> &'static str {
        match self {
            EntityKind::Person => "person names",
            EntityKind::Org => "organizations",
            EntityKind::Place => "locations",
            EntityKind::Street => "street names",
            EntityKind::Road => "road numbers",
            EntityKind::Address => "addresses",
            EntityKind::Vehicle => "vehicles",
            EntityKind::Phone => "phone numbers",
            EntityKind::Email => "email addresses",
            EntityKind::Iban => "bank accounts",
            EntityKind::NationalId => "national ID numbers",
            EntityKind::BirthDate => "dates of birth",
        }
    }

    /// Overlap precedence for the span resolver. Higher wins.
    ///
    /// High-precision identifier patterns outrank structural matches
    /// (addresses, streets), which outrank name-like matches. Every kind
    /// has a distinct value so overlap resolution is a total order.
    pub fn priority(self) -> u8 {
        match self {
            EntityKind::Email => 120,
            EntityKind::Iban => 110,
            EntityKind::Phone => 100,
            EntityKind::NationalId => 90,
            EntityKind::BirthDate => 80,
            EntityKind::Address => 70,
            EntityKind::Street => 60,
            EntityKind::Road => 50,
            EntityKind::Place => 40,
            EntityKind::Vehicle => 30,
            EntityKind::Org => 20,
            EntityKind::Person => 10,
        }
    }

    /// Whether value normalization strips formatting characters (spaces,
    /// dashes, dots, slashes, parentheses) before comparison, so that
    /// `555-1234` and `(555) 1234` group into one entity.
    pub fn strips_formatting(self) -> bool {
        matches!(
            self,
            EntityKind::Phone | EntityKind::Iban | EntityKind::NationalId
        )
    }

    /// Normalize a surface form for equivalence comparison.
    ///
    /// Default rule: collapse whitespace runs and fold case. Kinds with
    /// [`strips_formatting`](Self::strips_formatting) additionally drop
    /// separator characters and uppercase, so differently formatted
    /// renderings of one identifier compare equal. Name-like kinds get
    /// the default rule only: no fuzzy matching, no particle stripping,
    /// no token reordering.
    pub fn normalize_value(self, surface: &str) -> String {
        let collapsed = surface.split_whitespace().collect::<Vec<_>>().join(" ");
        if self.strips_formatting() {
            collapsed
                .chars()
                .filter(|c| !matches!(c, ' ' | '-' | '.' | '/' | '(' | ')'))
                .collect::<String>()
                .to_uppercase()
        } else {
            collapsed.to_lowercase()
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EntityKind {
    type Err = VeilError;

    /// Parses a tag in any letter case. `LOCATION` is accepted as an
    /// alias for `PLACE` (both appear in mapping artifacts in the wild).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_uppercase();
        let kind = match tag.as_str() {
            "PERSON" => EntityKind::Person,
            "ORG" => EntityKind::Org,
            "PLACE" | "LOCATION" => EntityKind::Place,
            "STREET" => EntityKind::Street,
            "ROAD" => EntityKind::Road,
            "ADDRESS" => EntityKind::Address,
            "VEHICLE" => EntityKind::Vehicle,
            "PHONE" => EntityKind::Phone,
            "EMAIL" => EntityKind::Email,
            "IBAN" => EntityKind::Iban,
            "ID" => EntityKind::NationalId,
            "DOB" => EntityKind::BirthDate,
            _ => {
                return Err(VeilError::UnknownKind {
                    tag: s.to_string(),
                })
            }
        };
        Ok(kind)
    }
}

impl From<EntityKind> for String {
    fn from(kind: EntityKind) -> Self {
        kind.tag().to_string()
    }
}

impl TryFrom<String> for EntityKind {
    type Error = VeilError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
