/// Mapping artifact errors.
///
/// Every variant is fatal for decode: without a trustworthy mapping the
/// engine cannot bind placeholders back to values.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("mapping file I/O error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("mapping file is malformed: {reason}")]
    Malformed { reason: String },

    #[error("mapping format version {found} is not supported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("placeholder {placeholder} appears more than once in mapping")]
    DuplicatePlaceholder { placeholder: String },

    #[error("placeholders {first} and {second} resolve to the same {kind} value")]
    ConflictingCanonical {
        first: String,
        second: String,
        kind: String,
    },
}
