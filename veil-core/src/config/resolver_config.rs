use serde::{Deserialize, Serialize};

use super::defaults;

/// Span resolver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Drop spans whose surface already looks masked (contains `XX` or
    /// `***`), so re-encoding partially sanitized documents does not
    /// tokenize mask characters. Default: true.
    pub skip_masked: bool,
    /// Drop spans below this confidence before grouping. Default: 0.0
    /// (keep everything the detector reports).
    pub min_confidence: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            skip_masked: defaults::DEFAULT_SKIP_MASKED,
            min_confidence: defaults::DEFAULT_MIN_CONFIDENCE,
        }
    }
}
