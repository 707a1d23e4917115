use serde::{Deserialize, Serialize};

use super::kind::EntityKind;

/// The canonical unit of sensitivity: one underlying value together with
/// every surface form it was seen under during an encode session.
///
/// The first occurrence (smallest start offset) fixes the canonical value
/// and the entity's position in allocation order. Entities are owned by
/// the encode session and outlive it only as mapping entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity category.
    pub kind: EntityKind,
    /// Representative string: the first surface form seen.
    pub canonical: String,
    /// All surface forms seen, deduplicated, in first-seen order.
    pub variants: Vec<String>,
    /// Byte offset of the first occurrence, used for deterministic ordering.
    pub first_offset: usize,
    /// Total number of spans grouped into this entity.
    pub occurrences: usize,
}

impl Entity {
    /// Create an entity from its first observed span.
    pub fn new(kind: EntityKind, surface: impl Into<String>, first_offset: usize) -> Self {
        let surface = surface.into();
        Self {
            kind,
            canonical: surface.clone(),
            variants: vec![surface],
            first_offset,
            occurrences: 1,
        }
    }

    /// Record another occurrence. New surface forms are appended to the
    /// variant list; repeats only bump the occurrence count.
    pub fn observe(&mut self, surface: &str) {
        self.occurrences += 1;
        if !self.variants.iter().any(|v| v == surface) {
            self.variants.push(surface.to_string());
        }
    }
}
