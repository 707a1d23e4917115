use serde::{Deserialize, Serialize};

use super::defaults;

/// Decode-time tolerance policy.
///
/// External AI output drifts: placeholders come back bolded, re-cased,
/// or padded. Each leniency below is independently switchable; the
/// `TYPE_n` core must still match exactly after these normalizations,
/// otherwise the token is reported as unresolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Accept markdown emphasis runs (`*`, `_`, `~`, backtick) just
    /// inside the delimiters, e.g. `⟦**PERSON_1**⟧`. Default: true.
    pub match_emphasis: bool,
    /// Accept any letter case in the type tag, e.g. `⟦person_1⟧`.
    /// Default: true.
    pub ignore_tag_case: bool,
    /// Accept extra whitespace just inside the delimiters, e.g.
    /// `⟦ PERSON_1 ⟧`. Default: true.
    pub allow_internal_whitespace: bool,
    /// Accept zero-padded indices, e.g. `⟦PERSON_001⟧`. Default: true.
    pub allow_leading_zeros: bool,
    /// Also match bare `TYPE_n` tokens with no delimiters at all.
    /// Off by default: an undelimited `PERSON_1` in prose is too likely
    /// to be organic text.
    pub bare_tokens: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            match_emphasis: defaults::DEFAULT_MATCH_EMPHASIS,
            ignore_tag_case: defaults::DEFAULT_IGNORE_TAG_CASE,
            allow_internal_whitespace: defaults::DEFAULT_ALLOW_INTERNAL_WHITESPACE,
            allow_leading_zeros: defaults::DEFAULT_ALLOW_LEADING_ZEROS,
            bare_tokens: defaults::DEFAULT_BARE_TOKENS,
        }
    }
}
