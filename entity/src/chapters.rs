use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::chapters::Model)]
#[sea_orm(schema_name = "story_app", table_name = "chapters")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    #[schema(value_type = String, format = Uuid)]
    pub id: Id,
    #[schema(value_type = String, format = Uuid)]
    pub work_id: Id,
    /// Display ordinal, free-form and not required to be unique
    pub number: Option<i32>,
    pub title: String,
    /// Ordering key of the chapter within its work
    pub order_hint: i32,
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
        belongs_to = "super::works::Entity",
        from = "Column::WorkId",
        to = "super::works::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Works,

    #[sea_orm(has_many = "super::scenes::Entity")]
    Scenes,
}

impl Related<super::works::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Works.def()
    }
}

impl Related<super::scenes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scenes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
