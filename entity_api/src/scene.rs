use super::error::Error;
use entity::chapters;
use entity::scenes::{ActiveModel, Column, Entity, Model};
use entity::Id;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    ConnectionTrait, QueryOrder, TryIntoModel,
};

use log::*;

/// Which scenes a listing covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneScope {
    All,
    Work(Id),
    Chapter(Id),
}

pub async fn create(db: &impl ConnectionTrait, scene_model: Model) -> Result<Model, Error> {
    debug!("New Scene Model to be inserted: {scene_model:?}");

    let now = chrono::Utc::now();

    let scene_active_model: ActiveModel = ActiveModel {
        chapter_id: Set(scene_model.chapter_id),
        work_id: Set(scene_model.work_id),
        scene_type: Set(scene_model.scene_type),
        custom_type_label: Set(scene_model.custom_type_label),
        title: Set(scene_model.title),
        content_markdown: Set(scene_model.content_markdown),
        order_hint: Set(scene_model.order_hint),
        sort_order: Set(scene_model.sort_order),
        emoji: Set(scene_model.emoji),
        image_url: Set(scene_model.image_url),
        published_at: Set(scene_model.published_at),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(scene_active_model.insert(db).await?.try_into_model()?)
}

/// Writes every mutable column of an already merged scene row.
pub async fn update(db: &impl ConnectionTrait, model: Model) -> Result<Model, Error> {
    debug!("Existing Scene model to be Updated: {model:?}");

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(model.id),
        chapter_id: Set(model.chapter_id),
        work_id: Set(model.work_id),
        scene_type: Set(model.scene_type),
        custom_type_label: Set(model.custom_type_label),
        title: Set(model.title),
        content_markdown: Set(model.content_markdown),
        order_hint: Set(model.order_hint),
        sort_order: Set(model.sort_order),
        emoji: Set(model.emoji),
        image_url: Set(model.image_url),
        published_at: Set(model.published_at),
        created_at: Unchanged(model.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

pub async fn delete_by_id(db: &impl ConnectionTrait, id: Id) -> Result<(), Error> {
    let result = Entity::delete_by_id(id).exec(db).await?;

    if result.rows_affected == 0 {
        debug!("Scene with id {id} not found");
        return Err(Error::not_found());
    }

    Ok(())
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(Error::not_found)
}

/// Loads a scene together with the chapter it is bound to, if any.
pub async fn find_by_id_with_chapter(
    db: &impl ConnectionTrait,
    id: Id,
) -> Result<(Model, Option<chapters::Model>), Error> {
    Entity::find_by_id(id)
        .find_also_related(chapters::Entity)
        .one(db)
        .await?
        .ok_or_else(Error::not_found)
}

/// Loads every scene in `ids` with a single `IN` query. Ids that do not resolve
/// are simply absent from the result.
pub async fn find_by_ids(db: &impl ConnectionTrait, ids: &[Id]) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?)
}

/// Scenes in insertion order (`created_at`, then `id`), each joined with its chapter.
pub async fn find_all_with_chapter(
    db: &impl ConnectionTrait,
    scope: SceneScope,
) -> Result<Vec<(Model, Option<chapters::Model>)>, Error> {
    let mut query = Entity::find().find_also_related(chapters::Entity);

    query = match scope {
        SceneScope::All => query,
        SceneScope::Work(work_id) => query.filter(Column::WorkId.eq(work_id)),
        SceneScope::Chapter(chapter_id) => query.filter(Column::ChapterId.eq(chapter_id)),
    };

    Ok(query
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}
