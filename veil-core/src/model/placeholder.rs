use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::kind::EntityKind;
use crate::errors::VeilError;

/// A stable, type-scoped token standing in for one entity: `TYPE_n` with
/// `n >= 1`, allocated per kind in first-occurrence order.
///
/// This is the bare core token. In sanitized text it appears wrapped in
/// the configured delimiter pair; the wrapping is the substitution
/// engine's concern, not part of the token identity.
///
/// Serialized as its string form (`"PERSON_1"`) so mapping artifacts are
/// directly readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Placeholder {
    pub kind: EntityKind,
    pub index: u32,
}

impl Placeholder {
    pub fn new(kind: EntityKind, index: u32) -> Self {
        Self { kind, index }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind.tag(), self.index)
    }
}

impl FromStr for Placeholder {
    type Err = VeilError;

    /// Parses `TYPE_n`. The tag is matched case-insensitively and the
    /// index numerically, so `person_001` parses to `PERSON_1`. An index
    /// of zero is rejected; numbering starts at one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || VeilError::InvalidPlaceholder {
            token: s.to_string(),
        };

        let (tag, digits) = token.rsplit_once('_').ok_or_else(invalid)?;
        let kind: EntityKind = tag.parse().map_err(|_| invalid())?;
        let index: u32 = digits.parse().map_err(|_| invalid())?;
        if index == 0 {
            return Err(invalid());
        }
        Ok(Self { kind, index })
    }
}

impl From<Placeholder> for String {
    fn from(p: Placeholder) -> Self {
        p.to_string()
    }
}

impl TryFrom<String> for Placeholder {
    type Error = VeilError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
