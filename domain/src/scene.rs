use crate::error::Error;
use crate::ordering::order_scenes;
use crate::patch::present;
use crate::scene_type::SceneType;
use crate::{chapters, scenes, Id};
use entity_api::{chapter, work};
use log::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Deserialize;
use utoipa::ToSchema;

pub use entity_api::scene::{delete_by_id, SceneScope};

const UNTITLED_SCENE: &str = "Scène sans titre";

/// Body of a scene creation request. Everything but `content_markdown` is optional.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NewScene {
    #[schema(value_type = Option<String>, format = Uuid)]
    pub chapter_id: Option<Id>,
    /// Only read for scenes without a chapter; otherwise the chapter's work is used.
    #[schema(value_type = Option<String>, format = Uuid)]
    pub work_id: Option<Id>,
    #[serde(default)]
    pub scene_type: SceneType,
    pub custom_type_label: Option<String>,
    pub title: Option<String>,
    pub content_markdown: Option<String>,
    pub order_hint: Option<i32>,
    #[serde(alias = "global_order")]
    pub sort_order: Option<i32>,
    pub emoji: Option<String>,
    pub image_url: Option<String>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub published_at: Option<DateTimeWithTimeZone>,
}

/// Partial update of a scene. An absent key leaves the column alone; for the
/// nullable columns `Some(None)` is an explicit JSON `null` that clears it.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SceneChanges {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, format = Uuid)]
    pub chapter_id: Option<Option<Id>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, format = Uuid)]
    pub work_id: Option<Option<Id>>,
    pub scene_type: Option<SceneType>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub custom_type_label: Option<Option<String>>,
    /// A blank or `null` title is derived again from the scene's other fields.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    pub content_markdown: Option<String>,
    pub order_hint: Option<i32>,
    #[serde(alias = "global_order")]
    pub sort_order: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub emoji: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub published_at: Option<Option<DateTimeWithTimeZone>>,
}

impl SceneChanges {
    pub fn is_empty(&self) -> bool {
        self.chapter_id.is_none()
            && self.work_id.is_none()
            && self.scene_type.is_none()
            && self.custom_type_label.is_none()
            && self.title.is_none()
            && self.content_markdown.is_none()
            && self.order_hint.is_none()
            && self.sort_order.is_none()
            && self.emoji.is_none()
            && self.image_url.is_none()
            && self.published_at.is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Title shown for a scene: the given title, else a special scene's label, else
/// "Scène {n}" from the first explicit order value, else a placeholder.
pub fn derive_title(
    title: Option<&str>,
    scene_type: SceneType,
    custom_type_label: Option<&str>,
    sort_order: Option<i32>,
    order_hint: Option<i32>,
) -> String {
    if let Some(title) = non_blank(title) {
        return title.to_string();
    }

    if scene_type.is_special() {
        if let Some(label) = non_blank(custom_type_label) {
            return label.to_string();
        }
    }

    match sort_order.or(order_hint) {
        Some(n) => format!("Scène {n}"),
        None => UNTITLED_SCENE.to_string(),
    }
}

/// Special scenes stand outside every chapter.
pub fn validate_type_consistency(
    scene_type: SceneType,
    chapter_id: Option<Id>,
) -> Result<(), Error> {
    if scene_type.is_special() && chapter_id.is_some() {
        warn!("Rejected special scene bound to chapter {chapter_id:?}");
        return Err(Error::validation("Special scenes cannot have a chapter_id"));
    }
    Ok(())
}

fn work_mismatch() -> Error {
    Error::validation("work_id does not match the chapter's work")
}

pub async fn create(db: &DatabaseConnection, new_scene: NewScene) -> Result<scenes::Model, Error> {
    let content_markdown = new_scene
        .content_markdown
        .ok_or_else(|| Error::validation("Missing required fields: content_markdown"))?;
    validate_type_consistency(new_scene.scene_type, new_scene.chapter_id)?;

    let txn = db.begin().await?;

    let work_id = match new_scene.chapter_id {
        Some(chapter_id) => {
            let chapter = chapter::find_by_id(&txn, chapter_id).await?;
            if new_scene.work_id.is_some_and(|id| id != chapter.work_id) {
                return Err(work_mismatch());
            }
            Some(chapter.work_id)
        }
        None => match new_scene.work_id {
            Some(work_id) => Some(work::find_by_id(&txn, work_id).await?.id),
            None => None,
        },
    };

    let title = derive_title(
        new_scene.title.as_deref(),
        new_scene.scene_type,
        new_scene.custom_type_label.as_deref(),
        new_scene.sort_order,
        new_scene.order_hint,
    );

    let now = chrono::Utc::now();
    let scene = entity_api::scene::create(
        &txn,
        scenes::Model {
            id: Id::nil(),
            chapter_id: new_scene.chapter_id,
            work_id,
            scene_type: new_scene.scene_type,
            custom_type_label: new_scene.custom_type_label,
            title,
            content_markdown,
            order_hint: new_scene.order_hint.unwrap_or_default(),
            sort_order: new_scene.sort_order.unwrap_or_default(),
            emoji: new_scene.emoji,
            image_url: new_scene.image_url,
            published_at: new_scene.published_at,
            created_at: now.into(),
            updated_at: now.into(),
        },
    )
    .await?;

    txn.commit().await?;

    debug!("Created scene {} in work {:?}", scene.id, scene.work_id);
    Ok(scene)
}

pub async fn update(
    db: &DatabaseConnection,
    id: Id,
    changes: SceneChanges,
) -> Result<scenes::Model, Error> {
    if changes.is_empty() {
        return Err(Error::validation("No fields to update"));
    }
    if let (Some(scene_type), Some(chapter_id)) = (changes.scene_type, changes.chapter_id) {
        validate_type_consistency(scene_type, chapter_id)?;
    }

    let txn = db.begin().await?;

    let mut scene = entity_api::scene::find_by_id(&txn, id).await?;

    if let Some(chapter_id) = changes.chapter_id {
        scene.chapter_id = chapter_id;
    }
    if let Some(scene_type) = changes.scene_type {
        scene.scene_type = scene_type;
    }
    if let Some(custom_type_label) = changes.custom_type_label {
        scene.custom_type_label = custom_type_label;
    }
    if let Some(content_markdown) = changes.content_markdown {
        scene.content_markdown = content_markdown;
    }
    if let Some(order_hint) = changes.order_hint {
        scene.order_hint = order_hint;
    }
    if let Some(sort_order) = changes.sort_order {
        scene.sort_order = sort_order;
    }
    if let Some(emoji) = changes.emoji {
        scene.emoji = emoji;
    }
    if let Some(image_url) = changes.image_url {
        scene.image_url = image_url;
    }
    if let Some(published_at) = changes.published_at {
        scene.published_at = published_at;
    }

    validate_type_consistency(scene.scene_type, scene.chapter_id)?;

    match scene.chapter_id {
        Some(chapter_id) if changes.chapter_id.is_some() || changes.work_id.is_some() => {
            let chapter = chapter::find_by_id(&txn, chapter_id).await?;
            if let Some(Some(work_id)) = changes.work_id {
                if work_id != chapter.work_id {
                    return Err(work_mismatch());
                }
            }
            scene.work_id = Some(chapter.work_id);
        }
        None => {
            if let Some(work_id) = changes.work_id {
                if let Some(work_id) = work_id {
                    work::find_by_id(&txn, work_id).await?;
                }
                scene.work_id = work_id;
            }
        }
        _ => {}
    }

    if let Some(title) = changes.title {
        scene.title = derive_title(
            title.as_deref(),
            scene.scene_type,
            scene.custom_type_label.as_deref(),
            Some(scene.sort_order),
            Some(scene.order_hint),
        );
    }

    let scene = entity_api::scene::update(&txn, scene).await?;

    txn.commit().await?;

    Ok(scene)
}

pub async fn find_by_id(
    db: &DatabaseConnection,
    id: Id,
) -> Result<(scenes::Model, Option<chapters::Model>), Error> {
    Ok(entity_api::scene::find_by_id_with_chapter(db, id).await?)
}

/// Scenes of `scope` in narrative order, each with its chapter.
pub async fn list_ordered(
    db: &DatabaseConnection,
    scope: SceneScope,
) -> Result<Vec<(scenes::Model, Option<chapters::Model>)>, Error> {
    match scope {
        SceneScope::All => {}
        SceneScope::Work(work_id) => {
            work::find_by_id(db, work_id).await?;
        }
        SceneScope::Chapter(chapter_id) => {
            chapter::find_by_id(db, chapter_id).await?;
        }
    }

    let scenes = entity_api::scene::find_all_with_chapter(db, scope).await?;

    Ok(order_scenes(scenes))
}
