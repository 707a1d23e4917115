use serde::{Deserialize, Serialize};

use super::defaults;

/// Legend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    /// Whether encode reports include the value-free count summary.
    /// Default: true.
    pub enabled: bool,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_LEGEND_ENABLED,
        }
    }
}
