use crate::controller::ApiResponse;
use crate::response::scene::SceneWithChapter;
use crate::{AppState, Error};
use crate::extractors::{id_path::IdPath, json_body::JsonBody};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::scene::SceneScope;
use domain::work::{NewWork, WorkChanges};
use domain::{chapter as ChapterApi, scene as SceneApi, work as WorkApi, works};

use log::*;

/// GET all Works, most recently edited first
#[utoipa::path(
    get,
    path = "/works",
    responses(
        (status = 200, description = "Successfully retrieved all Works", body = [works::Model]),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn index(State(app_state): State<AppState>) -> Result<impl IntoResponse, Error> {
    debug!("GET all Works");

    let works = WorkApi::find_all(app_state.db_conn_ref()).await?;

    Ok(Json(ApiResponse::new(works)))
}

/// POST create a new Work
#[utoipa::path(
    post,
    path = "/works",
    request_body = NewWork,
    responses(
        (status = 201, description = "Successfully Created a New Work", body = works::Model),
        (status = 400, description = "Missing or blank title")
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    JsonBody(new_work): JsonBody<NewWork>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Work from: {new_work:?}");

    let work = WorkApi::create(app_state.db_conn_ref(), new_work).await?;

    debug!("New Work: {work:?}");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Work created", work)),
    ))
}

/// GET a particular Work specified by its id.
#[utoipa::path(
    get,
    path = "/works/{id}",
    params(("id" = String, Path, description = "Work id to retrieve")),
    responses(
        (status = 200, description = "Successfully retrieved a Work", body = works::Model),
        (status = 404, description = "Work not found")
    )
)]
pub async fn read(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Work by id: {id}");

    let work = WorkApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(work)))
}

#[utoipa::path(
    put,
    path = "/works/{id}",
    params(("id" = String, Path, description = "Id of work to update")),
    request_body = WorkChanges,
    responses(
        (status = 200, description = "Successfully Updated Work", body = works::Model),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Work not found")
    )
)]
pub async fn update(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(changes): JsonBody<WorkChanges>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Work with id: {id}");

    let work = WorkApi::update(app_state.db_conn_ref(), id, changes).await?;

    debug!("Updated Work: {work:?}");

    Ok(Json(ApiResponse::with_message("Work updated", work)))
}

/// DELETE a Work together with its chapters and scenes.
#[utoipa::path(
    delete,
    path = "/works/{id}",
    params(("id" = String, Path, description = "Work id to delete")),
    responses(
        (status = 200, description = "Successfully deleted a Work"),
        (status = 404, description = "Work not found")
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Work by id: {id}");

    WorkApi::delete_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::message("Work deleted")))
}

/// GET the chapters of a Work by ascending order hint
#[utoipa::path(
    get,
    path = "/works/{id}/chapters",
    params(("id" = String, Path, description = "Work id")),
    responses(
        (status = 200, description = "Chapters of the Work", body = [domain::chapters::Model]),
        (status = 404, description = "Work not found")
    )
)]
pub async fn chapters(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Chapters of Work: {id}");

    let chapters = ChapterApi::find_by_work(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(chapters)))
}

/// GET the scenes of a Work in narrative order, special scenes included
#[utoipa::path(
    get,
    path = "/works/{id}/scenes",
    params(("id" = String, Path, description = "Work id")),
    responses(
        (status = 200, description = "Ordered scenes of the Work", body = [SceneWithChapter]),
        (status = 404, description = "Work not found")
    )
)]
pub async fn scenes(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, Error> {
    debug!("GET ordered Scenes of Work: {id}");

    let scenes: Vec<SceneWithChapter> =
        SceneApi::list_ordered(app_state.db_conn_ref(), SceneScope::Work(id))
            .await?
            .into_iter()
            .map(SceneWithChapter::from)
            .collect();

    Ok(Json(ApiResponse::new(scenes)))
}
