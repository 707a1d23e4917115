use tracing::{info, warn};

use veil_core::{Detector, Placeholder, Span, VeilConfig, VeilResult};
use veil_mapping::{Mapping, MappingIndex};

use crate::allocator::{check_delimiters, PlaceholderAllocator};
use crate::legend::Legend;
use crate::normalizer::group;
use crate::resolver::resolve;
use crate::substitute::{forward, reverse, TokenMatcher, UnresolvedToken};

/// One complete encode of one document: resolve candidate spans, group
/// them into entities, allocate placeholders, substitute, and build the
/// mapping artifact.
///
/// All numbering state is private to the session, so placeholder indices
/// restart at 1 for every session and two sessions never interfere.
#[derive(Debug, Clone)]
pub struct EncodeSession {
    config: VeilConfig,
}

/// Everything one encode produces.
#[derive(Debug, Clone)]
pub struct EncodeOutcome {
    /// The document with every resolved span replaced by a delimited
    /// placeholder token.
    pub sanitized: String,
    /// The artifact needed to reverse the substitution later.
    pub mapping: Mapping,
    pub report: EncodeReport,
}

/// Value-free summary of what an encode did.
#[derive(Debug, Clone)]
pub struct EncodeReport {
    /// Per-kind entity counts, absent when the legend is disabled.
    pub legend: Option<Legend>,
    /// Spans actually replaced in the text.
    pub replacements: usize,
    /// Candidates discarded by the resolver (malformed, filtered, or
    /// losers of overlap resolution).
    pub dropped_spans: usize,
}

impl EncodeSession {
    pub fn new(config: VeilConfig) -> Self {
        Self { config }
    }

    /// Encode with caller-supplied candidate spans.
    ///
    /// Fails fast if the source already contains a placeholder delimiter;
    /// a decode of such a document could not tell original text from
    /// substitution.
    pub fn encode(&self, text: &str, candidates: Vec<Span>) -> VeilResult<EncodeOutcome> {
        check_delimiters(text, &self.config.placeholders)?;

        let resolution = resolve(text, candidates, &self.config.resolver);
        let grouped = group(&resolution.spans);

        let mut allocator = PlaceholderAllocator::new();
        let placeholders = allocator.allocate(&grouped.entities);

        let per_span: Vec<Placeholder> = grouped
            .assignments
            .iter()
            .map(|&entity| placeholders[entity])
            .collect();
        let sanitized = forward(text, &resolution.spans, &per_span, &self.config.placeholders);

        let legend = self
            .config
            .legend
            .enabled
            .then(|| Legend::from_entities(&grouped.entities));
        let mapping = Mapping::from_entities(
            text,
            placeholders.into_iter().zip(grouped.entities).collect(),
        );

        info!(
            replacements = resolution.spans.len(),
            entities = mapping.len(),
            dropped = resolution.dropped,
            "document encoded"
        );
        Ok(EncodeOutcome {
            sanitized,
            mapping,
            report: EncodeReport {
                legend,
                replacements: resolution.spans.len(),
                dropped_spans: resolution.dropped,
            },
        })
    }

    /// Run the given detectors, then encode their combined candidates.
    ///
    /// A failing detector fails the whole encode: silently proceeding
    /// with partial coverage would ship an under-redacted document.
    /// Callers that accept reduced coverage re-run with the detectors
    /// that work, or pass spans to [`encode`](Self::encode) directly.
    pub fn encode_with(&self, text: &str, detectors: &[&dyn Detector]) -> VeilResult<EncodeOutcome> {
        let mut candidates = Vec::new();
        for detector in detectors {
            candidates.extend(detector.scan(text)?);
        }
        self.encode(text, candidates)
    }
}

/// Outcome of the paired-source fingerprint check at decode time.
///
/// A mismatch means the mapping was made from a different document than
/// the one the caller paired it with. Restoration still runs; stale
/// pairings are a caller mistake worth flagging, not a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerprintStatus {
    /// No source document was supplied.
    Unchecked,
    Verified,
    Mismatch,
}

/// Everything one decode produces.
#[derive(Debug, Clone)]
pub struct DecodeOutcome {
    /// The text with every resolvable token replaced by its canonical
    /// value. Unresolvable candidates stay in place verbatim.
    pub restored: String,
    /// Token-shaped candidates that could not be restored, in text order.
    pub unresolved: Vec<UnresolvedToken>,
    pub fingerprint: FingerprintStatus,
}

/// Restores placeholder tokens from a loaded mapping.
///
/// Borrows the mapping for its lifetime; builds the lookup index and the
/// tolerant token matcher once, then decodes any number of texts.
pub struct DecodeSession<'a> {
    mapping: &'a Mapping,
    index: MappingIndex<'a>,
    matcher: TokenMatcher,
    source: Option<&'a str>,
}

impl<'a> DecodeSession<'a> {
    pub fn new(mapping: &'a Mapping, config: &VeilConfig) -> VeilResult<Self> {
        mapping.validate()?;
        let matcher = TokenMatcher::new(&config.placeholders, &config.decode)?;
        Ok(Self {
            mapping,
            index: MappingIndex::build(mapping),
            matcher,
            source: None,
        })
    }

    /// Supply the source document the mapping is supposed to pair with,
    /// enabling the fingerprint check on every decode.
    pub fn with_source(mut self, source: &'a str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn decode(&self, text: &str) -> DecodeOutcome {
        let restored = reverse(text, &self.index, &self.matcher);

        let fingerprint = match self.source {
            None => FingerprintStatus::Unchecked,
            Some(source) if self.mapping.verify_fingerprint(source) => {
                FingerprintStatus::Verified
            }
            Some(_) => {
                warn!("mapping fingerprint does not match the supplied source document");
                FingerprintStatus::Mismatch
            }
        };

        info!(
            unresolved = restored.unresolved.len(),
            entities = self.mapping.len(),
            "document decoded"
        );
        DecodeOutcome {
            restored: restored.text,
            unresolved: restored.unresolved,
            fingerprint,
        }
    }
}
