pub use super::chapters::Entity as Chapters;
pub use super::scene_transitions::Entity as SceneTransitions;
pub use super::scenes::Entity as Scenes;
pub use super::works::Entity as Works;
