use std::cmp::Ordering;

use tracing::{debug, warn};

use veil_core::config::ResolverConfig;
use veil_core::Span;

/// Output of span resolution: the surviving spans in document order,
/// plus how many candidates were discarded on the way.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Non-overlapping spans sorted by start offset.
    pub spans: Vec<Span>,
    /// Candidates dropped: malformed, masked, below the confidence
    /// floor, or defeated in an overlap contest.
    pub dropped: usize,
}

/// Reduce raw detector output to a conflict-free span set.
///
/// Detectors are trusted on content but not on geometry: spans with
/// impossible offsets, or a surface that disagrees with the source
/// slice, are discarded with a warning instead of corrupting the
/// substitution pass. Overlaps are settled by kind priority, then span
/// length, then confidence. Both the sort and the contest use a total
/// comparison chain, so the outcome does not depend on the order
/// detectors emitted their candidates.
pub fn resolve(text: &str, candidates: Vec<Span>, config: &ResolverConfig) -> Resolution {
    let total = candidates.len();
    let mut sane: Vec<Span> = Vec::with_capacity(total);

    for span in candidates {
        if span.is_empty()
            || span.end > text.len()
            || !text.is_char_boundary(span.start)
            || !text.is_char_boundary(span.end)
        {
            warn!(
                start = span.start,
                end = span.end,
                "discarding span with invalid offsets"
            );
            continue;
        }
        if text[span.start..span.end] != span.surface {
            warn!(
                start = span.start,
                end = span.end,
                "discarding span whose surface disagrees with the source slice"
            );
            continue;
        }
        if span.surface.trim().is_empty() {
            warn!(start = span.start, "discarding whitespace-only span");
            continue;
        }
        if span.confidence.value() < config.min_confidence {
            debug!(
                start = span.start,
                confidence = span.confidence.value(),
                "dropping span below the confidence floor"
            );
            continue;
        }
        if config.skip_masked && is_masked(&span.surface) {
            debug!(start = span.start, "skipping already-masked surface");
            continue;
        }
        sane.push(span);
    }

    sane.sort_by(compare);

    let mut kept: Vec<Span> = Vec::with_capacity(sane.len());
    for candidate in sane {
        let verdict = match kept.last() {
            Some(last) if last.overlaps(&candidate) => {
                if beats(&candidate, last) {
                    Verdict::Replace
                } else {
                    Verdict::Drop
                }
            }
            _ => Verdict::Keep,
        };
        match verdict {
            Verdict::Keep => kept.push(candidate),
            Verdict::Replace => {
                debug!(
                    start = candidate.start,
                    winner = %candidate.kind,
                    "overlap contest replaces previously kept span"
                );
                if let Some(slot) = kept.last_mut() {
                    *slot = candidate;
                }
            }
            Verdict::Drop => {
                debug!(
                    start = candidate.start,
                    loser = %candidate.kind,
                    "overlap contest drops span"
                );
            }
        }
    }

    let dropped = total - kept.len();
    debug!(
        candidates = total,
        kept = kept.len(),
        dropped,
        "span resolution complete"
    );
    Resolution { spans: kept, dropped }
}

enum Verdict {
    Keep,
    Replace,
    Drop,
}

/// Document position first, longer span first at equal start, then the
/// contest chain as a final disambiguator.
fn compare(a: &Span, b: &Span) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| b.end.cmp(&a.end))
        .then_with(|| b.kind.priority().cmp(&a.kind.priority()))
        .then_with(|| b.confidence.total_cmp(a.confidence))
}

/// Whether a challenger takes an overlap from the incumbent. Ties keep
/// the incumbent, which entered first under the total sort order.
fn beats(challenger: &Span, incumbent: &Span) -> bool {
    let chain = challenger
        .kind
        .priority()
        .cmp(&incumbent.kind.priority())
        .then_with(|| challenger.len().cmp(&incumbent.len()))
        .then_with(|| challenger.confidence.total_cmp(incumbent.confidence));
    chain == Ordering::Greater
}

/// Whether a surface already looks like prior masking output.
fn is_masked(surface: &str) -> bool {
    surface.contains("XX") || surface.contains("xx") || surface.contains("***")
}
