use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Whether a scene sits inside a chapter or stands on its own (prologue, epilogue, interlude...).
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    EnumIter,
    Deserialize,
    Default,
    Serialize,
    DeriveActiveEnum,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "scene_type")]
pub enum SceneType {
    /// Bound to a chapter
    #[sea_orm(string_value = "standard")]
    #[default]
    Standard,
    /// Never bound to a chapter
    #[sea_orm(string_value = "special")]
    Special,
}

impl SceneType {
    pub fn is_special(&self) -> bool {
        *self == SceneType::Special
    }
}

impl std::fmt::Display for SceneType {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneType::Standard => write!(fmt, "standard"),
            SceneType::Special => write!(fmt, "special"),
        }
    }
}
