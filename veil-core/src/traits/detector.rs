use crate::errors::VeilResult;
use crate::model::Span;

/// Candidate-span detection.
///
/// Implementations range from pure regex tables to model-backed NER; the
/// engine depends only on this interface. Returned spans may overlap or
/// nest freely; disambiguation belongs to the span resolver, and
/// detectors should not pre-filter on that basis.
///
/// Detector construction may be expensive (model loading). Batch
/// processing acquires one detector and shares it by reference across
/// documents, hence `Send + Sync`.
pub trait Detector: Send + Sync {
    /// Short identifier used in logs and error reports.
    fn name(&self) -> &str;

    /// Scan text and return candidate spans.
    fn scan(&self, text: &str) -> VeilResult<Vec<Span>>;
}
