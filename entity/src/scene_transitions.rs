//! SeaORM Entity for the scene_transitions table.
//! Each row is a directed "comes after" edge between two scenes.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique index over (scene_before_id, scene_after_id)
pub const PAIR_CONSTRAINT: &str = "scene_transitions_pair_key";
/// Unique index over (scene_before_id, transition_order)
pub const ORDER_CONSTRAINT: &str = "scene_transitions_order_key";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::scene_transitions::Model)]
#[sea_orm(schema_name = "story_app", table_name = "scene_transitions")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    #[schema(value_type = String, format = Uuid)]
    pub id: Id,
    #[schema(value_type = String, format = Uuid)]
    pub scene_before_id: Id,
    #[schema(value_type = String, format = Uuid)]
    pub scene_after_id: Id,
    pub transition_label: String,
    /// Position among the outgoing transitions of `scene_before_id`
    pub transition_order: i32,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scenes::Entity",
        from = "Column::SceneBeforeId",
        to = "super::scenes::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    SceneBefore,

    #[sea_orm(
        belongs_to = "super::scenes::Entity",
        from = "Column::SceneAfterId",
        to = "super::scenes::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    SceneAfter,
}

impl ActiveModelBehavior for ActiveModel {}
