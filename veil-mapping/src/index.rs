use std::collections::HashMap;

use veil_core::model::{EntityKind, Placeholder};

use crate::artifact::{Mapping, MappingEntry};

/// Lookup indexes over a loaded mapping.
///
/// The placeholder index drives decode. The variant index is defensive:
/// it answers "which placeholder does this literal belong to" for audit
/// tooling and leak checks; decode itself never consults it.
pub struct MappingIndex<'a> {
    by_placeholder: HashMap<Placeholder, &'a MappingEntry>,
    by_variant: HashMap<(EntityKind, String), Placeholder>,
}

impl<'a> MappingIndex<'a> {
    pub fn build(mapping: &'a Mapping) -> Self {
        let mut by_placeholder = HashMap::with_capacity(mapping.entries.len());
        let mut by_variant = HashMap::new();

        for entry in &mapping.entries {
            by_placeholder.insert(entry.placeholder, entry);
            by_variant.insert(
                (entry.kind, entry.kind.normalize_value(&entry.canonical)),
                entry.placeholder,
            );
            for variant in &entry.variants {
                by_variant.insert(
                    (entry.kind, entry.kind.normalize_value(variant)),
                    entry.placeholder,
                );
            }
        }

        Self {
            by_placeholder,
            by_variant,
        }
    }

    /// The canonical value decode restores for this placeholder.
    pub fn canonical(&self, placeholder: Placeholder) -> Option<&'a str> {
        self.by_placeholder
            .get(&placeholder)
            .map(|e| e.canonical.as_str())
    }

    pub fn entry(&self, placeholder: Placeholder) -> Option<&'a MappingEntry> {
        self.by_placeholder.get(&placeholder).copied()
    }

    /// Placeholder for a known surface form, compared under the kind's
    /// equivalence rule.
    pub fn placeholder_for_variant(&self, kind: EntityKind, surface: &str) -> Option<Placeholder> {
        self.by_variant
            .get(&(kind, kind.normalize_value(surface)))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.by_placeholder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_placeholder.is_empty()
    }
}
