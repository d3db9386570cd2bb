use crate::controller::ApiResponse;
use crate::{AppState, Error};
use crate::extractors::{id_path::IdPath, json_body::JsonBody};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::transition::NewTransition;
use domain::{scene_transitions, transition as TransitionApi};

use log::*;

/// POST link two scenes. Label and order are filled in when omitted.
#[utoipa::path(
    post,
    path = "/transitions",
    request_body = NewTransition,
    responses(
        (status = 201, description = "Successfully Created a New Transition", body = scene_transitions::Model),
        (status = 400, description = "A scene cannot follow itself"),
        (status = 404, description = "One of the scenes does not exist"),
        (status = 409, description = "The two scenes are already linked")
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    JsonBody(new_transition): JsonBody<NewTransition>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Transition from: {new_transition:?}");

    let transition =
        TransitionApi::create(app_state.db_conn_ref(), &app_state.config, new_transition).await?;

    debug!("New Transition: {transition:?}");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Transition created", transition)),
    ))
}

#[utoipa::path(
    get,
    path = "/transitions/{id}",
    params(("id" = String, Path, description = "Transition id to retrieve")),
    responses(
        (status = 200, description = "Successfully retrieved a Transition", body = scene_transitions::Model),
        (status = 404, description = "Transition not found")
    )
)]
pub async fn read(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Transition by id: {id}");

    let transition = TransitionApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(transition)))
}

#[utoipa::path(
    delete,
    path = "/transitions/{id}",
    params(("id" = String, Path, description = "Transition id to delete")),
    responses(
        (status = 200, description = "Successfully deleted a Transition"),
        (status = 404, description = "Transition not found")
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Transition by id: {id}");

    TransitionApi::delete_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::message("Transition deleted")))
}
