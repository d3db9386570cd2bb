use domain::Id;
use sea_orm::Value;
use serde::Deserialize;
use utoipa::IntoParams;

use domain::{IntoQueryFilterMap, QueryFilterMap};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct IndexParams {
    /// Only list the chapters of this work
    #[param(value_type = Option<String>, format = Uuid)]
    pub(crate) work_id: Option<Id>,
}

impl IntoQueryFilterMap for IndexParams {
    fn into_query_filter_map(self) -> QueryFilterMap {
        let mut query_filter_map = QueryFilterMap::new();
        if let Some(work_id) = self.work_id {
            query_filter_map.insert(
                "work_id".to_string(),
                Some(Value::Uuid(Some(Box::new(work_id)))),
            );
        }

        query_filter_map
    }
}
