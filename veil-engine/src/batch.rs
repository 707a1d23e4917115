use rayon::prelude::*;
use tracing::debug;

use veil_core::{Detector, VeilConfig, VeilResult};

use crate::session::{EncodeOutcome, EncodeSession};

/// Encode many documents in parallel with one shared detector.
///
/// Each document gets a fresh session, so placeholder numbering restarts
/// at 1 per document and no state crosses document boundaries. The
/// detector is the only shared resource; it is borrowed read-only by
/// every worker. Failures are returned in the matching output slot
/// instead of aborting the rest of the batch, and the output order
/// follows the input order.
pub fn encode_batch(
    documents: &[&str],
    detector: &dyn Detector,
    config: &VeilConfig,
) -> Vec<VeilResult<EncodeOutcome>> {
    debug!(documents = documents.len(), "encoding batch");
    documents
        .par_iter()
        .map(|text| EncodeSession::new(config.clone()).encode_with(text, &[detector]))
        .collect()
}
