//! # veil-core
//!
//! Foundation crate for the Veil sanitization engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod fingerprint;
pub mod model;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::VeilConfig;
pub use errors::{MappingError, VeilError, VeilResult};
pub use model::{Confidence, Entity, EntityKind, Placeholder, Span};
pub use traits::Detector;
