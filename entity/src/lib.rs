use uuid::Uuid;

pub mod prelude;

pub mod chapters;
pub mod scene_transitions;
pub mod scene_type;
pub mod scenes;
pub mod works;

/// A type alias that represents any Entity's internal id field data type.
/// Aliased so that it's easy to change the underlying type if necessary.
pub type Id = Uuid;
