use super::error::Error;
use entity::works::{ActiveModel, Column, Entity, Model};
use entity::Id;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    ConnectionTrait, QueryOrder, TryIntoModel,
};

use log::*;

pub async fn create(db: &impl ConnectionTrait, work_model: Model) -> Result<Model, Error> {
    debug!("New Work Model to be inserted: {work_model:?}");

    let now = chrono::Utc::now();

    let work_active_model: ActiveModel = ActiveModel {
        title: Set(work_model.title),
        description: Set(work_model.description),
        episode_label: Set(work_model.episode_label),
        chapter_label: Set(work_model.chapter_label),
        published: Set(work_model.published),
        published_date: Set(work_model.published_date),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(work_active_model.insert(db).await?.try_into_model()?)
}

/// Persists every mutable column of `model` onto the existing row with the same id.
pub async fn update(db: &impl ConnectionTrait, model: Model) -> Result<Model, Error> {
    debug!("Existing Work model to be Updated: {model:?}");

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(model.id),
        title: Set(model.title),
        description: Set(model.description),
        episode_label: Set(model.episode_label),
        chapter_label: Set(model.chapter_label),
        published: Set(model.published),
        published_date: Set(model.published_date),
        created_at: Unchanged(model.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

pub async fn delete_by_id(db: &impl ConnectionTrait, id: Id) -> Result<(), Error> {
    let result = Entity::delete_by_id(id).exec(db).await?;

    if result.rows_affected == 0 {
        debug!("Work with id {id} not found");
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

/// Most recently edited works first.
pub async fn find_all(db: &impl ConnectionTrait) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .order_by_desc(Column::UpdatedAt)
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?)
}
