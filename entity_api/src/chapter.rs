use super::error::Error;
use entity::chapters::{ActiveModel, Column, Entity, Model};
use entity::Id;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    ConnectionTrait, QueryOrder, TryIntoModel,
};

use log::*;

pub async fn create(db: &impl ConnectionTrait, chapter_model: Model) -> Result<Model, Error> {
    debug!("New Chapter Model to be inserted: {chapter_model:?}");

    let now = chrono::Utc::now();

    let chapter_active_model: ActiveModel = ActiveModel {
        work_id: Set(chapter_model.work_id),
        number: Set(chapter_model.number),
        title: Set(chapter_model.title),
        order_hint: Set(chapter_model.order_hint),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(chapter_active_model.insert(db).await?.try_into_model()?)
}

/// Persists the mutable columns of `model`. A chapter never moves to another work.
pub async fn update(db: &impl ConnectionTrait, model: Model) -> Result<Model, Error> {
    debug!("Existing Chapter model to be Updated: {model:?}");

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(model.id),
        work_id: Unchanged(model.work_id),
        number: Set(model.number),
        title: Set(model.title),
        order_hint: Set(model.order_hint),
        created_at: Unchanged(model.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

pub async fn delete_by_id(db: &impl ConnectionTrait, id: Id) -> Result<(), Error> {
    let result = Entity::delete_by_id(id).exec(db).await?;

    if result.rows_affected == 0 {
        debug!("Chapter with id {id} not found");
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

/// Chapters of a work in reading order.
pub async fn find_by_work(db: &impl ConnectionTrait, work_id: Id) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::WorkId.eq(work_id))
        .order_by_asc(Column::OrderHint)
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntityApiErrorKind;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};

    #[tokio::test]
    async fn create_returns_a_new_chapter_model() -> Result<(), Error> {
        let now = chrono::Utc::now();

        let chapter_model = Model {
            id: Id::new_v4(),
            work_id: Id::new_v4(),
            number: Some(2),
            title: "Chapitre second".to_owned(),
            order_hint: 2,
            created_at: now.into(),
            updated_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![chapter_model.clone()]])
            .into_connection();

        let chapter = create(&db, chapter_model.clone()).await?;

        assert_eq!(chapter.id, chapter_model.id);
        assert_eq!(chapter.number, Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn find_by_work_orders_by_order_hint() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let work_id = Id::new_v4();
        let _ = find_by_work(&db, work_id).await?;

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "chapters"."id", "chapters"."work_id", "chapters"."number", "chapters"."title", "chapters"."order_hint", "chapters"."created_at", "chapters"."updated_at" FROM "story_app"."chapters" WHERE "chapters"."work_id" = $1 ORDER BY "chapters"."order_hint" ASC, "chapters"."created_at" ASC"#,
                [work_id.into()]
            )]
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_by_id_succeeds_when_a_row_was_deleted() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        delete_by_id(&db, Id::new_v4()).await?;

        Ok(())
    }

    #[tokio::test]
    async fn delete_by_id_returns_error_when_chapter_not_found() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let result = delete_by_id(&db, Id::new_v4()).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );

        Ok(())
    }
}
