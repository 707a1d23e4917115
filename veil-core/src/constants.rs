/// Mapping artifact format version. Bumped on any change to the
/// serialized layout; decode rejects artifacts with other versions.
pub const FORMAT_VERSION: u32 = 1;

/// Default opening placeholder delimiter (U+27E6, rare in prose).
pub const DEFAULT_OPEN_DELIMITER: &str = "⟦";

/// Default closing placeholder delimiter (U+27E7).
pub const DEFAULT_CLOSE_DELIMITER: &str = "⟧";

/// Minimum canonical-value length covered by the non-leakage check.
/// Shorter values produce too many accidental substring hits to scan for.
pub const MIN_LEAK_CHECK_LEN: usize = 4;
