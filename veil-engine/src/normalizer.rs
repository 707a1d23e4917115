use std::collections::hash_map::Entry as MapEntry;
use std::collections::HashMap;

use tracing::debug;

use veil_core::{Entity, EntityKind, Span};

/// Spans folded into entities, with a span-to-entity assignment.
#[derive(Debug, Clone, Default)]
pub struct Grouped {
    /// Entities in first-occurrence order.
    pub entities: Vec<Entity>,
    /// For each input span, in order, the index of its entity.
    pub assignments: Vec<usize>,
}

/// Group resolved spans into entities by kind-scoped value equivalence.
///
/// Equivalence is exact-after-normalization, per
/// [`EntityKind::normalize_value`]: case and whitespace folding for
/// name-like kinds, plus formatting stripping for phone, IBAN, and ID
/// numbers. No fuzzy matching beyond that; "John Smith" and "Jon Smith"
/// stay separate entities. The first surface seen becomes the canonical
/// value; later forms are recorded as variants. Input spans arrive in
/// document order from the resolver, so entity order is first-occurrence
/// order by construction.
pub fn group(spans: &[Span]) -> Grouped {
    let mut grouped = Grouped::default();
    let mut by_key: HashMap<(EntityKind, String), usize> = HashMap::new();

    for span in spans {
        let key = (span.kind, span.kind.normalize_value(&span.surface));
        match by_key.entry(key) {
            MapEntry::Occupied(slot) => {
                let index = *slot.get();
                grouped.entities[index].observe(&span.surface);
                grouped.assignments.push(index);
            }
            MapEntry::Vacant(slot) => {
                let index = grouped.entities.len();
                slot.insert(index);
                grouped
                    .entities
                    .push(Entity::new(span.kind, span.surface.clone(), span.start));
                grouped.assignments.push(index);
            }
        }
    }

    debug!(
        spans = spans.len(),
        entities = grouped.entities.len(),
        "grouped spans into entities"
    );
    grouped
}
