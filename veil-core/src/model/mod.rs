pub mod confidence;
pub mod entity;
pub mod kind;
pub mod placeholder;
pub mod span;

pub use confidence::Confidence;
pub use entity::Entity;
pub use kind::EntityKind;
pub use placeholder::Placeholder;
pub use span::Span;
