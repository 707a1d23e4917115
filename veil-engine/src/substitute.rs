use regex::Regex;
use tracing::debug;

use veil_core::config::{DecodeConfig, PlaceholderConfig};
use veil_core::{EntityKind, Placeholder, Span, VeilError, VeilResult};
use veil_mapping::MappingIndex;

/// Replace resolved spans with delimited placeholder tokens.
///
/// Single left-to-right pass; `placeholders[i]` is the token for
/// `spans[i]`. Spans must be sorted, non-overlapping, and on char
/// boundaries, which the resolver guarantees. Text outside the spans is
/// copied through byte-identically.
pub fn forward(
    text: &str,
    spans: &[Span],
    placeholders: &[Placeholder],
    config: &PlaceholderConfig,
) -> String {
    debug_assert_eq!(spans.len(), placeholders.len());

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (span, placeholder) in spans.iter().zip(placeholders) {
        out.push_str(&text[cursor..span.start]);
        out.push_str(&config.open);
        out.push_str(&placeholder.to_string());
        out.push_str(&config.close);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Markdown decoration accepted around a token core when the policy
/// allows emphasis matching.
const EMPHASIS: [char; 4] = ['*', '_', '~', '`'];

/// Finds placeholder tokens in AI-modified text, tolerating the drift
/// the decode policy allows.
///
/// One combined regex scans for delimited candidates (and bare `TYPE_n`
/// cores when enabled); the policy checks run per hit. The `TYPE_n`
/// core must match exactly after the allowed edge normalizations.
pub struct TokenMatcher {
    pattern: Regex,
    policy: DecodeConfig,
    open: String,
    close: String,
}

impl TokenMatcher {
    pub fn new(placeholders: &PlaceholderConfig, policy: &DecodeConfig) -> VeilResult<Self> {
        let source = build_pattern(placeholders, policy);
        let pattern = Regex::new(&source).map_err(|e| VeilError::TokenMatcher {
            open: placeholders.open.clone(),
            close: placeholders.close.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            pattern,
            policy: policy.clone(),
            open: placeholders.open.clone(),
            close: placeholders.close.clone(),
        })
    }

    /// Parse the placeholder a candidate core stands for, if the policy
    /// accepts its rendering. Tolerances only trim the edges; whitespace
    /// inside the tag or index can never parse.
    fn resolve_core(&self, raw: &str) -> Option<Placeholder> {
        let mut core = raw;
        if self.policy.allow_internal_whitespace {
            core = core.trim();
        }
        if self.policy.match_emphasis {
            core = core.trim_matches(|c| EMPHASIS.contains(&c));
        }
        if self.policy.allow_internal_whitespace {
            core = core.trim();
        }

        let (tag, digits) = core.rsplit_once('_')?;
        if tag.is_empty() || digits.is_empty() {
            return None;
        }
        if tag.chars().any(char::is_whitespace) {
            return None;
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if !self.policy.ignore_tag_case && tag.chars().any(|c| c.is_ascii_lowercase()) {
            return None;
        }
        if !self.policy.allow_leading_zeros && digits.len() > 1 && digits.starts_with('0') {
            return None;
        }

        let kind: EntityKind = tag.parse().ok()?;
        let index: u32 = digits.parse().ok()?;
        if index == 0 {
            return None;
        }
        Some(Placeholder::new(kind, index))
    }
}

/// A token-shaped candidate that could not be restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedToken {
    /// The parsed core (`PERSON_9`) when the candidate parsed but had no
    /// mapping entry; otherwise the raw matched text.
    pub token: String,
    /// Byte offset of the candidate in the decode input.
    pub offset: usize,
}

/// Result of the reverse pass over one document.
#[derive(Debug, Clone)]
pub struct Restored {
    pub text: String,
    pub unresolved: Vec<UnresolvedToken>,
}

/// Replace placeholder tokens with their canonical values.
///
/// Each candidate is handled independently, so the pass is insensitive
/// to token reordering, duplication, and deletion. Decode always
/// restores the canonical form, never a positional variant. Candidates
/// that fail the policy or have no mapping entry stay in the text
/// verbatim and are reported.
pub fn reverse(text: &str, index: &MappingIndex<'_>, matcher: &TokenMatcher) -> Restored {
    let mut out = String::with_capacity(text.len());
    let mut unresolved = Vec::new();
    let mut cursor = 0;

    for m in matcher.pattern.find_iter(text) {
        out.push_str(&text[cursor..m.start()]);
        cursor = m.end();
        let matched = m.as_str();

        let is_delimited = !matcher.open.is_empty()
            && matched.len() >= matcher.open.len() + matcher.close.len()
            && matched.starts_with(matcher.open.as_str())
            && matched.ends_with(matcher.close.as_str());
        let raw_core = if is_delimited {
            &matched[matcher.open.len()..matched.len() - matcher.close.len()]
        } else {
            matched
        };

        match matcher.resolve_core(raw_core) {
            Some(placeholder) => match index.canonical(placeholder) {
                Some(value) => out.push_str(value),
                None => {
                    out.push_str(matched);
                    unresolved.push(UnresolvedToken {
                        token: placeholder.to_string(),
                        offset: m.start(),
                    });
                }
            },
            None => {
                out.push_str(matched);
                unresolved.push(UnresolvedToken {
                    token: matched.to_string(),
                    offset: m.start(),
                });
            }
        }
    }
    out.push_str(&text[cursor..]);

    if !unresolved.is_empty() {
        debug!(count = unresolved.len(), "unresolved tokens left in place");
    }
    Restored {
        text: out,
        unresolved,
    }
}

/// Build the combined candidate regex. The delimited branch comes first
/// so a wrapped token is never half-claimed by the bare branch.
fn build_pattern(placeholders: &PlaceholderConfig, policy: &DecodeConfig) -> String {
    let mut branches: Vec<String> = Vec::new();

    if !placeholders.open.is_empty() && !placeholders.close.is_empty() {
        let open = regex::escape(&placeholders.open);
        let close = regex::escape(&placeholders.close);
        let inner = inner_class(&placeholders.open, &placeholders.close);
        branches.push(format!("{open}{inner}*{close}"));
    }

    if policy.bare_tokens {
        let mut tags: Vec<&str> = EntityKind::ALL.iter().map(|k| k.tag()).collect();
        tags.push("LOCATION");
        let alternation = tags.join("|");
        let tag_group = if policy.ignore_tag_case {
            format!("(?i:{alternation})")
        } else {
            format!("(?:{alternation})")
        };
        branches.push(format!(r"\b{tag_group}_[0-9]+\b"));
    }

    if branches.is_empty() {
        // Degenerate configuration; match nothing, decode is identity.
        return r"[^\s\S]".to_string();
    }
    branches.join("|")
}

/// Character class for text between the delimiters: anything except a
/// newline or a delimiter character, so a stray delimiter cannot swallow
/// the rest of the line.
fn inner_class(open: &str, close: &str) -> String {
    let mut class = String::from("[^\\n");
    let mut seen: Vec<char> = Vec::new();
    for c in open.chars().chain(close.chars()) {
        if seen.contains(&c) {
            continue;
        }
        seen.push(c);
        if matches!(c, '\\' | ']' | '^' | '-' | '[' | '&' | '~') {
            class.push('\\');
        }
        class.push(c);
    }
    class.push(']');
    class
}
