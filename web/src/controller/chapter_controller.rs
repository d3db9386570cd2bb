use crate::controller::ApiResponse;
use crate::params::chapter::IndexParams;
use crate::response::scene::SceneWithChapter;
use crate::{AppState, Error};
use crate::extractors::{id_path::IdPath, json_body::JsonBody, query_params::QueryParams};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::chapter::{ChapterChanges, NewChapter};
use domain::scene::SceneScope;
use domain::{chapter as ChapterApi, chapters, scene as SceneApi};

use log::*;

#[utoipa::path(
    get,
    path = "/chapters",
    params(IndexParams),
    responses(
        (status = 200, description = "Successfully retrieved Chapters", body = [chapters::Model]),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn index(
    State(app_state): State<AppState>,
    QueryParams(params): QueryParams<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Chapters with params: {params:?}");

    let chapters = ChapterApi::find_by(app_state.db_conn_ref(), params).await?;

    Ok(Json(ApiResponse::new(chapters)))
}

/// POST create a new Chapter in an existing Work
#[utoipa::path(
    post,
    path = "/chapters",
    request_body = NewChapter,
    responses(
        (status = 201, description = "Successfully Created a New Chapter", body = chapters::Model),
        (status = 400, description = "Missing work_id"),
        (status = 404, description = "Work not found")
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    JsonBody(new_chapter): JsonBody<NewChapter>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Chapter from: {new_chapter:?}");

    let chapter = ChapterApi::create(app_state.db_conn_ref(), new_chapter).await?;

    debug!("New Chapter: {chapter:?}");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Chapter created", chapter)),
    ))
}

#[utoipa::path(
    get,
    path = "/chapters/{id}",
    params(("id" = String, Path, description = "Chapter id to retrieve")),
    responses(
        (status = 200, description = "Successfully retrieved a Chapter", body = chapters::Model),
        (status = 404, description = "Chapter not found")
    )
)]
pub async fn read(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Chapter by id: {id}");

    let chapter = ChapterApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(chapter)))
}

#[utoipa::path(
    put,
    path = "/chapters/{id}",
    params(("id" = String, Path, description = "Id of chapter to update")),
    request_body = ChapterChanges,
    responses(
        (status = 200, description = "Successfully Updated Chapter", body = chapters::Model),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Chapter not found")
    )
)]
pub async fn update(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(changes): JsonBody<ChapterChanges>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Chapter with id: {id}");

    let chapter = ChapterApi::update(app_state.db_conn_ref(), id, changes).await?;

    Ok(Json(ApiResponse::with_message("Chapter updated", chapter)))
}

#[utoipa::path(
    delete,
    path = "/chapters/{id}",
    params(("id" = String, Path, description = "Chapter id to delete")),
    responses(
        (status = 200, description = "Successfully deleted a Chapter"),
        (status = 404, description = "Chapter not found")
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Chapter by id: {id}");

    ChapterApi::delete_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::message("Chapter deleted")))
}

#[utoipa::path(
    get,
    path = "/chapters/{id}/scenes",
    params(("id" = String, Path, description = "Chapter id")),
    responses(
        (status = 200, description = "Ordered scenes of the Chapter", body = [SceneWithChapter]),
        (status = 404, description = "Chapter not found")
    )
)]
pub async fn scenes(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, Error> {
    debug!("GET ordered Scenes of Chapter: {id}");

    let scenes: Vec<SceneWithChapter> =
        SceneApi::list_ordered(app_state.db_conn_ref(), SceneScope::Chapter(id))
            .await?
            .into_iter()
            .map(SceneWithChapter::from)
            .collect();

    Ok(Json(ApiResponse::new(scenes)))
}
