pub mod decode_config;
pub mod legend_config;
pub mod placeholder_config;
pub mod resolver_config;

pub use decode_config::DecodeConfig;
pub use legend_config::LegendConfig;
pub use placeholder_config::PlaceholderConfig;
pub use resolver_config::ResolverConfig;

use serde::{Deserialize, Serialize};

use crate::errors::VeilResult;

/// Default values for all configuration fields.
pub mod defaults {
    pub const DEFAULT_OPEN_DELIMITER: &str = crate::constants::DEFAULT_OPEN_DELIMITER;
    pub const DEFAULT_CLOSE_DELIMITER: &str = crate::constants::DEFAULT_CLOSE_DELIMITER;
    pub const DEFAULT_SKIP_MASKED: bool = true;
    pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.0;
    pub const DEFAULT_MATCH_EMPHASIS: bool = true;
    pub const DEFAULT_IGNORE_TAG_CASE: bool = true;
    pub const DEFAULT_ALLOW_INTERNAL_WHITESPACE: bool = true;
    pub const DEFAULT_ALLOW_LEADING_ZEROS: bool = true;
    pub const DEFAULT_BARE_TOKENS: bool = false;
    pub const DEFAULT_LEGEND_ENABLED: bool = true;
}

/// Root configuration for the Veil engine.
///
/// Every section and field has a default, so an empty TOML string yields
/// a fully usable configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VeilConfig {
    pub placeholders: PlaceholderConfig,
    pub resolver: ResolverConfig,
    pub decode: DecodeConfig,
    pub legend: LegendConfig,
}

impl VeilConfig {
    /// Parse a TOML string, filling missing sections and fields with
    /// defaults.
    pub fn from_toml(toml_str: &str) -> VeilResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }
}
