use crate::chapters::{self, Model};
use crate::error::Error;
use crate::patch::present;
use crate::Id;
use entity_api::{query, work, IntoQueryFilterMap};
use log::*;
use sea_orm::{DatabaseConnection, Order, TransactionTrait};
use serde::Deserialize;
use utoipa::ToSchema;

pub use entity_api::chapter::{delete_by_id, find_by_id};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NewChapter {
    #[schema(value_type = Option<String>, format = Uuid)]
    pub work_id: Option<Id>,
    pub number: Option<i32>,
    pub title: Option<String>,
    pub order_hint: Option<i32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ChapterChanges {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub number: Option<Option<i32>>,
    pub title: Option<String>,
    pub order_hint: Option<i32>,
}

impl ChapterChanges {
    pub fn is_empty(&self) -> bool {
        self.number.is_none() && self.title.is_none() && self.order_hint.is_none()
    }
}

/// "Chapitre {n}" numbered by the display number, else the order hint, else 0.
pub fn derive_title(title: Option<&str>, number: Option<i32>, order_hint: Option<i32>) -> String {
    match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => title.to_string(),
        None => format!("Chapitre {}", number.or(order_hint).unwrap_or(0)),
    }
}

pub async fn find_by(
    db: &DatabaseConnection,
    params: impl IntoQueryFilterMap,
) -> Result<Vec<Model>, Error> {
    let chapters = query::find_by::<chapters::Entity, chapters::Column>(
        db,
        params.into_query_filter_map(),
        &[
            (chapters::Column::OrderHint, Order::Asc),
            (chapters::Column::CreatedAt, Order::Asc),
        ],
    )
    .await?;

    Ok(chapters)
}

/// Chapters of an existing work by ascending `order_hint`.
pub async fn find_by_work(db: &DatabaseConnection, work_id: Id) -> Result<Vec<Model>, Error> {
    work::find_by_id(db, work_id).await?;

    Ok(entity_api::chapter::find_by_work(db, work_id).await?)
}

pub async fn create(db: &DatabaseConnection, new_chapter: NewChapter) -> Result<Model, Error> {
    let work_id = new_chapter
        .work_id
        .ok_or_else(|| Error::validation("Missing required fields: work_id"))?;

    let txn = db.begin().await?;

    work::find_by_id(&txn, work_id).await?;

    let now = chrono::Utc::now();
    let chapter = entity_api::chapter::create(
        &txn,
        Model {
            id: Id::nil(),
            work_id,
            number: new_chapter.number,
            title: derive_title(
                new_chapter.title.as_deref(),
                new_chapter.number,
                new_chapter.order_hint,
            ),
            order_hint: new_chapter.order_hint.unwrap_or_default(),
            created_at: now.into(),
            updated_at: now.into(),
        },
    )
    .await?;

    txn.commit().await?;

    debug!("Created chapter {} in work {work_id}", chapter.id);
    Ok(chapter)
}

pub async fn update(db: &DatabaseConnection, id: Id, changes: ChapterChanges) -> Result<Model, Error> {
    if changes.is_empty() {
        return Err(Error::validation("No fields to update"));
    }

    let mut chapter = entity_api::chapter::find_by_id(db, id).await?;

    if let Some(number) = changes.number {
        chapter.number = number;
    }
    if let Some(order_hint) = changes.order_hint {
        chapter.order_hint = order_hint;
    }
    if let Some(title) = changes.title {
        chapter.title = derive_title(Some(title.as_str()), chapter.number, Some(chapter.order_hint));
    }

    Ok(entity_api::chapter::update(db, chapter).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainErrorKind;
    use crate::works;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn title_is_numbered_by_number_then_order_hint() {
        assert_eq!(derive_title(None, Some(2), Some(5)), "Chapitre 2");
        assert_eq!(derive_title(Some(""), None, Some(5)), "Chapitre 5");
        assert_eq!(derive_title(None, None, None), "Chapitre 0");
        assert_eq!(derive_title(Some("La forêt"), Some(2), None), "La forêt");
    }

    #[tokio::test]
    async fn create_requires_a_work() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = create(&db, NewChapter::default()).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Validation("Missing required fields: work_id".to_string())
        );
    }

    #[tokio::test]
    async fn create_in_unknown_work_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<works::Model>::new()])
            .into_connection();

        let result = create(
            &db,
            NewChapter {
                work_id: Some(Id::new_v4()),
                ..Default::default()
            },
        )
        .await;

        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn update_without_fields_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = update(&db, Id::new_v4(), ChapterChanges::default()).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Validation("No fields to update".to_string())
        );
    }
}
