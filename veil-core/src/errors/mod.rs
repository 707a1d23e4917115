pub mod mapping_error;

pub use mapping_error::MappingError;

/// Top-level error type for the Veil workspace.
///
/// Structural failures that would produce an incorrect or ambiguous
/// artifact are modeled here and abort the operation for that document.
/// Content-level anomalies (unresolved tokens, fingerprint drift) are not
/// errors; they are carried in the decode outcome instead.
#[derive(Debug, thiserror::Error)]
pub enum VeilError {
    /// A detector could not run. Recoverable by the caller: encoding
    /// still works with reduced coverage or with spans passed directly.
    #[error("detector '{detector}' unavailable: {reason}")]
    DetectorUnavailable { detector: String, reason: String },

    /// The source text already contains the placeholder delimiter, so a
    /// later decode could not tell original text from substitution.
    /// Fatal for that document's encode.
    #[error("placeholder delimiter {delimiter:?} already present in source at byte {offset} (near {snippet:?})")]
    PlaceholderCollision {
        delimiter: String,
        offset: usize,
        snippet: String,
    },

    #[error("unknown entity kind tag: {tag}")]
    UnknownKind { tag: String },

    #[error("invalid placeholder token: {token}")]
    InvalidPlaceholder { token: String },

    /// The decode token matcher could not be compiled from the
    /// configured delimiters. Fatal for that decode session.
    #[error("cannot build token matcher for delimiters {open:?} {close:?}: {reason}")]
    TokenMatcher {
        open: String,
        close: String,
        reason: String,
    },

    /// Mapping artifact failures. Fatal for decode.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type VeilResult<T> = Result<T, VeilError>;
