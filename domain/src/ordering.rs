//! Total order over the scenes of a narrative.
//!
//! Scenes sort by their global `sort_order`, then by the chapter-local
//! `order_hint`. The sort is stable, so callers that feed scenes in insertion
//! order (`created_at`, then `id`) get insertion order among exact ties.
//! Special scenes get no priority of their own: a prologue comes first only
//! because its `sort_order` is lower.

use crate::{chapters, scenes};

/// Anything that carries the two scene ordering keys.
pub trait SceneOrderKey {
    fn sort_order(&self) -> i32;
    fn order_hint(&self) -> i32;
}

impl SceneOrderKey for (scenes::Model, Option<chapters::Model>) {
    fn sort_order(&self) -> i32 {
        self.0.sort_order
    }

    fn order_hint(&self) -> i32 {
        self.0.order_hint
    }
}

pub fn order_scenes<T: SceneOrderKey>(mut scenes: Vec<T>) -> Vec<T> {
    scenes.sort_by_key(|scene| (scene.sort_order(), scene.order_hint()));
    scenes
}
