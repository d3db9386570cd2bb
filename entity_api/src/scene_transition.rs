use super::error::Error;
use entity::scene_transitions::{ActiveModel, Column, Entity, Model};
use entity::Id;
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ConnectionTrait, FromQueryResult, QueryOrder,
    QuerySelect, TryIntoModel,
};

use log::*;

#[derive(Debug, FromQueryResult)]
struct MaxOrder {
    max_order: Option<i32>,
}

pub async fn create(db: &impl ConnectionTrait, transition_model: Model) -> Result<Model, Error> {
    debug!("New SceneTransition Model to be inserted: {transition_model:?}");

    let now = chrono::Utc::now();

    let transition_active_model: ActiveModel = ActiveModel {
        scene_before_id: Set(transition_model.scene_before_id),
        scene_after_id: Set(transition_model.scene_after_id),
        transition_label: Set(transition_model.transition_label),
        transition_order: Set(transition_model.transition_order),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(transition_active_model.insert(db).await?.try_into_model()?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(Error::not_found)
}

/// Outgoing transitions of a scene by ascending `transition_order`.
pub async fn find_by_scene_before(
    db: &impl ConnectionTrait,
    scene_before_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::SceneBeforeId.eq(scene_before_id))
        .order_by_asc(Column::TransitionOrder)
        .all(db)
        .await?)
}

/// Highest `transition_order` among the outgoing transitions of `scene_before_id`,
/// `None` when the scene has none.
pub async fn max_order(
    db: &impl ConnectionTrait,
    scene_before_id: Id,
) -> Result<Option<i32>, Error> {
    let result = Entity::find()
        .select_only()
        .column_as(Column::TransitionOrder.max(), "max_order")
        .filter(Column::SceneBeforeId.eq(scene_before_id))
        .into_model::<MaxOrder>()
        .one(db)
        .await?;

    Ok(result.and_then(|row| row.max_order))
}

pub async fn exists_pair(
    db: &impl ConnectionTrait,
    scene_before_id: Id,
    scene_after_id: Id,
) -> Result<bool, Error> {
    Ok(Entity::find()
        .filter(Column::SceneBeforeId.eq(scene_before_id))
        .filter(Column::SceneAfterId.eq(scene_after_id))
        .one(db)
        .await?
        .is_some())
}

pub async fn delete_by_id(db: &impl ConnectionTrait, id: Id) -> Result<(), Error> {
    let result = Entity::delete_by_id(id).exec(db).await?;

    if result.rows_affected == 0 {
        debug!("SceneTransition with id {id} not found");
        return Err(Error::not_found());
    }

    Ok(())
}
