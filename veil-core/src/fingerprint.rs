//! Source-document fingerprinting.
//!
//! Mapping artifacts record a blake3 digest of the document they were
//! derived from, so a decode session can warn when a mapping is paired
//! with the wrong file.

/// Hex-encoded blake3 digest of the text.
pub fn fingerprint(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}

/// Whether `text` hashes to `recorded`.
pub fn matches(text: &str, recorded: &str) -> bool {
    fingerprint(text) == recorded
}
