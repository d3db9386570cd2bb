use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_EPISODE_LABEL: &str = "Épisode";
pub const DEFAULT_CHAPTER_LABEL: &str = "Chapitre";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::works::Model)]
#[sea_orm(schema_name = "story_app", table_name = "works")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    #[schema(value_type = String, format = Uuid)]
    pub id: Id,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: Option<String>,
    /// Display label used for the work's episodes ("Épisode" by default)
    pub episode_label: String,
    /// Display label used for the work's chapters ("Chapitre" by default)
    pub chapter_label: String,
    pub published: bool,
    #[schema(value_type = Option<String>, format = Date)]
    pub published_date: Option<Date>,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::chapters::Entity")]
    Chapters,

    #[sea_orm(has_many = "super::scenes::Entity")]
    Scenes,
}

impl Related<super::chapters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chapters.def()
    }
}

impl Related<super::scenes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scenes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
