use crate::controller::ApiResponse;
use crate::response::scene::SceneWithChapter;
use crate::{AppState, Error};
use crate::extractors::{id_path::IdPath, json_body::JsonBody};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::scene::{NewScene, SceneChanges, SceneScope};
use domain::{scene as SceneApi, scene_transitions, scenes, transition as TransitionApi};

use log::*;

/// GET every Scene in narrative order
#[utoipa::path(
    get,
    path = "/scenes",
    responses(
        (status = 200, description = "All scenes ordered by sort_order then order_hint", body = [SceneWithChapter]),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn index(State(app_state): State<AppState>) -> Result<impl IntoResponse, Error> {
    debug!("GET all Scenes");

    let scenes: Vec<SceneWithChapter> =
        SceneApi::list_ordered(app_state.db_conn_ref(), SceneScope::All)
            .await?
            .into_iter()
            .map(SceneWithChapter::from)
            .collect();

    Ok(Json(ApiResponse::new(scenes)))
}

/// POST create a new Scene, standard (in a chapter) or special (standalone)
#[utoipa::path(
    post,
    path = "/scenes",
    request_body = NewScene,
    responses(
        (status = 201, description = "Successfully Created a New Scene", body = scenes::Model),
        (status = 400, description = "Missing content or special scene bound to a chapter"),
        (status = 404, description = "Chapter or work not found")
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    JsonBody(new_scene): JsonBody<NewScene>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Scene from: {new_scene:?}");

    let scene = SceneApi::create(app_state.db_conn_ref(), new_scene).await?;

    debug!("New Scene: {scene:?}");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Scene created", scene)),
    ))
}

#[utoipa::path(
    get,
    path = "/scenes/{id}",
    params(("id" = String, Path, description = "Scene id to retrieve")),
    responses(
        (status = 200, description = "Successfully retrieved a Scene", body = SceneWithChapter),
        (status = 404, description = "Scene not found")
    )
)]
pub async fn read(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Scene by id: {id}");

    let scene = SceneApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(SceneWithChapter::from(scene))))
}

/// PUT a partial update. Absent keys are left alone, `null` clears a nullable field.
#[utoipa::path(
    put,
    path = "/scenes/{id}",
    params(("id" = String, Path, description = "Id of scene to update")),
    request_body = SceneChanges,
    responses(
        (status = 200, description = "Successfully Updated Scene", body = scenes::Model),
        (status = 400, description = "Empty patch or special scene bound to a chapter"),
        (status = 404, description = "Scene, chapter or work not found")
    )
)]
pub async fn update(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(changes): JsonBody<SceneChanges>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Scene with id: {id}, changes: {changes:?}");

    let scene = SceneApi::update(app_state.db_conn_ref(), id, changes).await?;

    debug!("Updated Scene: {scene:?}");

    Ok(Json(ApiResponse::with_message("Scene updated", scene)))
}

#[utoipa::path(
    delete,
    path = "/scenes/{id}",
    params(("id" = String, Path, description = "Scene id to delete")),
    responses(
        (status = 200, description = "Successfully deleted a Scene"),
        (status = 404, description = "Scene not found")
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Scene by id: {id}");

    SceneApi::delete_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::message("Scene deleted")))
}

/// GET the transitions leaving a Scene, by transition order
#[utoipa::path(
    get,
    path = "/scenes/{id}/transitions",
    params(("id" = String, Path, description = "Source scene id")),
    responses(
        (status = 200, description = "Outgoing transitions", body = [scene_transitions::Model]),
        (status = 404, description = "Scene not found")
    )
)]
pub async fn transitions(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, Error> {
    debug!("GET outgoing Transitions of Scene: {id}");

    let transitions = TransitionApi::list_outgoing(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(transitions)))
}
