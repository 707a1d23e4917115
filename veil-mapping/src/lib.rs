//! # veil-mapping
//!
//! The mapping artifact: a versioned, local-only record binding each
//! placeholder to the sensitive value it replaced.
//!
//! Created once at the end of encode, loaded read-only at the start of
//! decode, never mutated in between and never transmitted anywhere. The
//! write path is atomic (temp file then rename) so an interrupted encode
//! cannot leave a truncated artifact behind; the read path validates the
//! format version and the placeholder ↔ value bijection before handing
//! the mapping to a decode session.

pub mod artifact;
pub mod index;

pub use artifact::{Mapping, MappingEntry};
pub use index::MappingIndex;
