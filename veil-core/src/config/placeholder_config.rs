use serde::{Deserialize, Serialize};

use super::defaults;

/// Placeholder rendering configuration.
///
/// The delimiter pair wraps every placeholder token in sanitized text.
/// The defaults (U+27E6 / U+27E7) are rare in prose; documents that do
/// contain them must be encoded with a different pair, since encode
/// fails fast on delimiter collision rather than escaping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Opening delimiter. Default: "⟦".
    pub open: String,
    /// Closing delimiter. Default: "⟧".
    pub close: String,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            open: defaults::DEFAULT_OPEN_DELIMITER.to_string(),
            close: defaults::DEFAULT_CLOSE_DELIMITER.to_string(),
        }
    }
}
