//! # veil-engine
//!
//! The substitution engine: everything between raw candidate spans and a
//! finished sanitized document, and the reverse trip back.
//!
//! Encode runs a fixed pipeline per document: resolve overlapping
//! candidates to a clean span set, group equivalent surfaces into
//! entities, allocate `TYPE_n` placeholders in first-occurrence order,
//! splice the delimited tokens into the text, and emit the mapping
//! artifact plus a value-free report. Decode borrows a loaded mapping and
//! finds tokens tolerantly, restoring each to its canonical value.
//!
//! Sessions own all their numbering state, so documents never interfere;
//! [`encode_batch`] runs one private session per document under rayon.

pub mod allocator;
pub mod batch;
pub mod legend;
pub mod normalizer;
pub mod resolver;
pub mod session;
pub mod substitute;

pub use batch::encode_batch;
pub use legend::Legend;
pub use session::{
    DecodeOutcome, DecodeSession, EncodeOutcome, EncodeReport, EncodeSession, FingerprintStatus,
};
pub use substitute::{TokenMatcher, UnresolvedToken};
