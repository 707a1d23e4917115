//! # veil-detect
//!
//! The bundled pattern-based [`Detector`]: pure regex tables with context
//! gates, no model dependency. Good at structured identifiers (phones,
//! IBANs, emails, addresses, plates) and at the structured name forms
//! common in incident reports; plain mixed-case name pairs are out of
//! reach for regexes and belong to a model-backed detector behind the
//! same trait.
//!
//! Every pattern compiles lazily into an `Option<Regex>`, so one bad
//! pattern degrades coverage instead of panicking the process.
//! [`PatternDetector::compile_failures`] reports which patterns are out.

pub mod patterns;

use std::collections::HashSet;

use tracing::{debug, trace};

use veil_core::{Detector, EntityKind, Span, VeilResult};

use crate::patterns::{all_patterns, apply_gate, DetectPattern};

/// Regex-table detector. Stateless and cheap to construct; the pattern
/// tables themselves are compiled once per process.
#[derive(Debug, Default)]
pub struct PatternDetector;

impl PatternDetector {
    pub fn new() -> Self {
        Self
    }

    /// Names of patterns whose regex failed to compile. Non-empty means
    /// scans run with reduced coverage.
    pub fn compile_failures() -> Vec<&'static str> {
        patterns::compile_failures()
    }
}

impl Detector for PatternDetector {
    fn name(&self) -> &str {
        "patterns"
    }

    fn scan(&self, text: &str) -> VeilResult<Vec<Span>> {
        let mut spans = Vec::new();
        let mut seen: HashSet<(usize, usize, EntityKind)> = HashSet::new();

        for pattern in all_patterns() {
            let Some(re) = pattern.regex.as_ref() else {
                trace!(pattern = pattern.name, "pattern unavailable, skipping");
                continue;
            };
            if pattern.capture == 0 {
                for m in re.find_iter(text) {
                    consider(text, &pattern, m.start(), m.end(), &mut seen, &mut spans);
                }
            } else {
                for caps in re.captures_iter(text) {
                    if let Some(group) = caps.get(pattern.capture) {
                        consider(
                            text,
                            &pattern,
                            group.start(),
                            group.end(),
                            &mut seen,
                            &mut spans,
                        );
                    }
                }
            }
        }

        debug!(candidates = spans.len(), "pattern scan complete");
        Ok(spans)
    }
}

/// Turn a raw regex hit into a candidate span, unless a filter or the
/// pattern's gate rejects it. Duplicate hits on the same range and kind
/// (several phone patterns often agree) are emitted once.
fn consider(
    text: &str,
    pattern: &DetectPattern,
    start: usize,
    end: usize,
    seen: &mut HashSet<(usize, usize, EntityKind)>,
    spans: &mut Vec<Span>,
) {
    let surface = &text[start..end];
    if surface.len() < pattern.min_len {
        return;
    }
    // Spans never cross lines; a match that does is a regex artifact.
    if surface.contains('\n') {
        return;
    }
    let Some(confidence) = apply_gate(pattern.gate, text, start, surface, pattern.base_confidence)
    else {
        return;
    };
    if !seen.insert((start, end, pattern.kind)) {
        return;
    }
    trace!(
        pattern = pattern.name,
        start,
        end,
        "candidate span accepted"
    );
    spans.push(Span::new(start, end, pattern.kind, confidence, surface));
}
