use serde::{Deserialize, Serialize};

use super::confidence::Confidence;
use super::kind::EntityKind;

/// A detected sensitive range in source text.
///
/// Half-open byte range `[start, end)`; offsets must lie on `char`
/// boundaries. Produced by a [`crate::traits::Detector`]; immutable;
/// never persisted directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// Entity category.
    pub kind: EntityKind,
    /// Detector confidence.
    pub confidence: Confidence,
    /// The literal text found, as reported by the detector.
    pub surface: String,
}

impl Span {
    pub fn new(
        start: usize,
        end: usize,
        kind: EntityKind,
        confidence: impl Into<Confidence>,
        surface: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            kind,
            confidence: confidence.into(),
            surface: surface.into(),
        }
    }

    /// Length of the range in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether the two half-open ranges share at least one byte.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}
