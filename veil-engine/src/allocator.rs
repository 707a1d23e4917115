use std::collections::HashMap;

use tracing::debug;

use veil_core::config::PlaceholderConfig;
use veil_core::{Entity, EntityKind, Placeholder, VeilError, VeilResult};

/// Per-kind placeholder counters for one encode pass.
///
/// Numbering is 1-based per kind and follows entity order, which is
/// first-occurrence order. Counters belong to the session; there is no
/// shared or global numbering state, so identical documents always
/// produce identical tokens.
#[derive(Debug, Default)]
pub struct PlaceholderAllocator {
    counters: HashMap<EntityKind, u32>,
}

impl PlaceholderAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next placeholder for a kind.
    pub fn next(&mut self, kind: EntityKind) -> Placeholder {
        let counter = self.counters.entry(kind).or_insert(0);
        *counter += 1;
        Placeholder::new(kind, *counter)
    }

    /// Allocate one placeholder per entity, in the order given.
    pub fn allocate(&mut self, entities: &[Entity]) -> Vec<Placeholder> {
        let placeholders: Vec<Placeholder> =
            entities.iter().map(|entity| self.next(entity.kind)).collect();
        debug!(count = placeholders.len(), "placeholders allocated");
        placeholders
    }
}

/// Fail fast if the source text already contains either delimiter.
///
/// There is no escaping. A document that uses the configured delimiter
/// pair must be encoded with a different pair; otherwise a later decode
/// could not tell original text from substitution.
pub fn check_delimiters(text: &str, config: &PlaceholderConfig) -> VeilResult<()> {
    for delimiter in [&config.open, &config.close] {
        if let Some(offset) = text.find(delimiter.as_str()) {
            return Err(VeilError::PlaceholderCollision {
                delimiter: delimiter.clone(),
                offset,
                snippet: snippet_around(text, offset, delimiter.len()),
            });
        }
    }
    Ok(())
}

/// A short window of text around the collision site, for the error
/// message. Edges snap inward to char boundaries.
fn snippet_around(text: &str, offset: usize, len: usize) -> String {
    const CONTEXT: usize = 20;
    let mut start = offset.saturating_sub(CONTEXT);
    while !text.is_char_boundary(start) {
        start += 1;
    }
    let mut end = (offset + len).saturating_add(CONTEXT).min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[start..end].to_string()
}
