//! This module re-exports various items from the `entity_api` crate.
//!
//! The purpose of this re-export is to ensure that consumers of the `domain` crate do not need to
//! directly depend on the `entity_api` crate. Store functions that need no extra rules are
//! re-exported from the per-resource modules, the rest are wrapped with validation and
//! computed defaults.
pub use entity_api::{IntoQueryFilterMap, QueryFilterMap};

// Re-exports from `entity` crate via `entity_api`
pub use entity_api::{chapters, scene_transitions, scene_type, scenes, works, Id};

pub mod chapter;
pub mod error;
pub mod ordering;
mod patch;
pub mod scene;
pub mod transition;
pub mod work;
