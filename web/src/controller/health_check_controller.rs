use crate::controller::ApiResponse;
use crate::{AppState, Error};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use sea_orm::ConnectionTrait;
use serde_json::json;

/// GET liveness of the API and its database
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API router is up and the database answers"),
        (status = 500, description = "Database unreachable")
    )
)]
pub async fn health_check(State(app_state): State<AppState>) -> Result<impl IntoResponse, Error> {
    app_state
        .db_conn_ref()
        .execute_unprepared("SELECT 1")
        .await?;

    Ok(Json(ApiResponse::new(json!({ "database": "up" }))))
}
