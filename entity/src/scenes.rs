//! SeaORM Entity for the scenes table.
//! A scene is either bound to a chapter (`standard`) or free-standing (`special`).

use crate::scene_type::SceneType;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::scenes::Model)]
#[sea_orm(schema_name = "story_app", table_name = "scenes")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    #[schema(value_type = String, format = Uuid)]
    pub id: Id,

    /// Always null for special scenes
    #[schema(value_type = Option<String>, format = Uuid)]
    pub chapter_id: Option<Id>,

    /// The work this scene belongs to. Mirrors the chapter's work for standard scenes.
    #[schema(value_type = Option<String>, format = Uuid)]
    pub work_id: Option<Id>,

    pub scene_type: SceneType,

    /// Display label of a special scene ("Prologue", "Épilogue"...)
    pub custom_type_label: Option<String>,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub content_markdown: String,

    /// Chapter-local tiebreaker
    pub order_hint: i32,

    /// Global ordering key across chapters and special scenes
    pub sort_order: i32,

    pub emoji: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub image_url: Option<String>,

    #[schema(value_type = Option<String>, format = DateTime)]
    pub published_at: Option<DateTimeWithTimeZone>,

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
        belongs_to = "super::chapters::Entity",
        from = "Column::ChapterId",
        to = "super::chapters::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Chapters,

    #[sea_orm(
        belongs_to = "super::works::Entity",
        from = "Column::WorkId",
        to = "super::works::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Works,
}

impl Related<super::chapters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chapters.def()
    }
}

impl Related<super::works::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Works.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
