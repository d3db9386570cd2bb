use crate::{error::Error, QueryFilterMap};
use sea_orm::strum::IntoEnumIterator;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder};

/// Find all records of an entity by the given query filter map, ordered by the
/// given columns in sequence.
pub async fn find_by<E, C>(
    db: &impl ConnectionTrait,
    query_filter_map: QueryFilterMap,
    order_by: &[(C, Order)],
) -> Result<Vec<E::Model>, Error>
where
    E: EntityTrait<Column = C>,
    C: ColumnTrait + IntoEnumIterator,
{
    let mut query = E::find();

    // We iterate through the entity's defined columns so that we only attempt
    // to filter by columns that exist.
    for column in C::iter() {
        if let Some(value) = query_filter_map.get(&column.to_string()) {
            query = query.filter(column.eq(value));
        }
    }

    for (column, order) in order_by {
        query = query.order_by(*column, order.clone());
    }

    Ok(query.all(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::chapters;
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction, Value};

    #[tokio::test]
    async fn find_by_filters_on_known_columns_and_orders() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<chapters::Model>::new()])
            .into_connection();

        let work_id = entity::Id::new_v4();
        let mut query_filter_map = QueryFilterMap::new();
        query_filter_map.insert(
            "work_id".to_string(),
            Some(Value::Uuid(Some(Box::new(work_id)))),
        );
        query_filter_map.insert(
            "not_a_column".to_string(),
            Some(Value::String(Some(Box::new("ignored".to_string())))),
        );

        find_by::<chapters::Entity, chapters::Column>(
            &db,
            query_filter_map,
            &[(chapters::Column::OrderHint, Order::Asc)],
        )
        .await?;

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "chapters"."id", "chapters"."work_id", "chapters"."number", "chapters"."title", "chapters"."order_hint", "chapters"."created_at", "chapters"."updated_at" FROM "story_app"."chapters" WHERE "chapters"."work_id" = $1 ORDER BY "chapters"."order_hint" ASC"#,
                [work_id.into()]
            )]
        );

        Ok(())
    }
}
