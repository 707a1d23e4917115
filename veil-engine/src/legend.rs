use std::fmt;

use veil_core::{Entity, EntityKind};

/// Value-free summary of what encode replaced: entity counts per kind,
/// in display order. Carries categories and counts only, never values,
/// so it is safe to ship alongside the sanitized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    counts: Vec<(EntityKind, usize)>,
}

impl Legend {
    /// Count entities per kind. Kinds with no entities are omitted.
    pub fn from_entities(entities: &[Entity]) -> Self {
        let counts = EntityKind::ALL
            .iter()
            .filter_map(|&kind| {
                let n = entities.iter().filter(|e| e.kind == kind).count();
                (n > 0).then_some((kind, n))
            })
            .collect();
        Self { counts }
    }

    /// Entity count for one kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        self.counts
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0, |(_, n)| *n)
    }

    /// Per-kind counts in display order.
    pub fn entries(&self) -> &[(EntityKind, usize)] {
        &self.counts
    }

    /// Total entity count across kinds.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl fmt::Display for Legend {
    /// Renders like `2 person names, 1 location, 3 phone numbers`.
    /// An empty legend renders as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (kind, n)) in self.counts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let label = if *n == 1 {
                kind.label()
            } else {
                kind.label_plural()
            };
            write!(f, "{n} {label}")?;
        }
        Ok(())
    }
}
