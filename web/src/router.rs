use crate::{controller::health_check_controller, response::scene::SceneWithChapter, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::controller::{
    chapter_controller, scene_controller, transition_controller, work_controller,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI document. To be a part
// of the rendered document, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Story Platform API"
        ),
        paths(
            health_check_controller::health_check,
            work_controller::index,
            work_controller::create,
            work_controller::read,
            work_controller::update,
            work_controller::delete,
            work_controller::chapters,
            work_controller::scenes,
            chapter_controller::index,
            chapter_controller::create,
            chapter_controller::read,
            chapter_controller::update,
            chapter_controller::delete,
            chapter_controller::scenes,
            scene_controller::index,
            scene_controller::create,
            scene_controller::read,
            scene_controller::update,
            scene_controller::delete,
            scene_controller::transitions,
            transition_controller::create,
            transition_controller::read,
            transition_controller::delete,
        ),
        components(
            schemas(
                domain::works::Model,
                domain::chapters::Model,
                domain::scenes::Model,
                domain::scene_transitions::Model,
                domain::scene_type::SceneType,
                domain::work::NewWork,
                domain::work::WorkChanges,
                domain::chapter::NewChapter,
                domain::chapter::ChapterChanges,
                domain::scene::NewScene,
                domain::scene::SceneChanges,
                domain::transition::NewTransition,
                SceneWithChapter,
            )
        ),
        tags(
            (name = "story_platform", description = "Works, chapters, scenes and the transitions between scenes")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes(app_state.clone()))
        .merge(work_routes(app_state.clone()))
        .merge(chapter_routes(app_state.clone()))
        .merge(scene_routes(app_state.clone()))
        .merge(transition_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check_controller::health_check))
        .with_state(app_state)
}

fn work_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/works", get(work_controller::index))
        .route("/works", post(work_controller::create))
        .route("/works/{id}", get(work_controller::read))
        .route("/works/{id}", put(work_controller::update))
        .route("/works/{id}", delete(work_controller::delete))
        .route("/works/{id}/chapters", get(work_controller::chapters))
        .route("/works/{id}/scenes", get(work_controller::scenes))
        .with_state(app_state)
}

fn chapter_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/chapters", get(chapter_controller::index))
        .route("/chapters", post(chapter_controller::create))
        .route("/chapters/{id}", get(chapter_controller::read))
        .route("/chapters/{id}", put(chapter_controller::update))
        .route("/chapters/{id}", delete(chapter_controller::delete))
        .route("/chapters/{id}/scenes", get(chapter_controller::scenes))
        .with_state(app_state)
}

fn scene_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/scenes", get(scene_controller::index))
        .route("/scenes", post(scene_controller::create))
        .route("/scenes/{id}", get(scene_controller::read))
        .route("/scenes/{id}", put(scene_controller::update))
        .route("/scenes/{id}", delete(scene_controller::delete))
        .route("/scenes/{id}/transitions", get(scene_controller::transitions))
        .with_state(app_state)
}

fn transition_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/transitions", post(transition_controller::create))
        .route("/transitions/{id}", get(transition_controller::read))
        .route("/transitions/{id}", delete(transition_controller::delete))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use clap::Parser;
    use domain::{chapters, scenes, works, Id};
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use serde_json::{json, Value};
    use service::config::Config;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(db: DatabaseConnection) -> Router {
        let config = Config::parse_from(["story_platform"]);
        define_routes(AppState::new(config, &Arc::new(db)))
    }

    fn empty_db() -> DatabaseConnection {
        MockDatabase::new(DatabaseBackend::Postgres).into_connection()
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn work(title: &str) -> works::Model {
        let now = chrono::Utc::now();
        works::Model {
            id: Id::new_v4(),
            title: title.to_owned(),
            description: None,
            episode_label: works::DEFAULT_EPISODE_LABEL.to_owned(),
            chapter_label: works::DEFAULT_CHAPTER_LABEL.to_owned(),
            published: false,
            published_date: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn health_pings_the_database() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let (status, body) = send(app(db), Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "data": {"database": "up"}}));
    }

    #[tokio::test]
    async fn creating_a_work_returns_201_with_the_record() {
        let stored = work("Les Voyages");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored.clone()]])
            .into_connection();

        let (status, body) = send(
            app(db),
            Method::POST,
            "/works",
            Some(json!({"title": "Les Voyages"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "Work created");
        assert_eq!(body["data"]["id"], stored.id.to_string());
        assert!(body["data"]["created_at"].is_string());
    }

    #[tokio::test]
    async fn work_without_title_is_a_bad_request() {
        let (status, body) = send(app(empty_db()), Method::POST, "/works", Some(json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"status": "error", "message": "Missing required fields: title"})
        );
    }

    #[tokio::test]
    async fn listing_works_wraps_them_in_data() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[work("B"), work("A")]])
            .into_connection();

        let (status, body) = send(app(db), Method::GET, "/works", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn special_scene_with_chapter_is_a_bad_request() {
        let (status, body) = send(
            app(empty_db()),
            Method::POST,
            "/scenes",
            Some(json!({
                "scene_type": "special",
                "chapter_id": Id::new_v4(),
                "content_markdown": "Il était une fois"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Special scenes cannot have a chapter_id");
    }

    #[tokio::test]
    async fn empty_scene_patch_is_a_bad_request() {
        let uri = format!("/scenes/{}", Id::new_v4());

        let (status, body) = send(app(empty_db()), Method::PUT, &uri, Some(json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "No fields to update");
    }

    #[tokio::test]
    async fn unknown_scene_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<(scenes::Model, Option<chapters::Model>)>::new()])
            .into_connection();
        let uri = format!("/scenes/{}", Id::new_v4());

        let (status, body) = send(app(db), Method::GET, &uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn self_transition_is_a_bad_request() {
        let id = Id::new_v4();

        let (status, body) = send(
            app(empty_db()),
            Method::POST,
            "/transitions",
            Some(json!({"scene_before_id": id, "scene_after_id": id})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "A scene cannot follow itself");
    }

    #[tokio::test]
    async fn transition_body_missing_a_field_is_a_bad_request() {
        let (status, body) = send(
            app(empty_db()),
            Method::POST,
            "/transitions",
            Some(json!({"scene_before_id": Id::new_v4()})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert!(body["message"]
            .as_str()
            .is_some_and(|message| message.contains("scene_after_id")));
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/works")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"title\": "))
            .unwrap();

        let response = app(empty_db()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn id_that_is_not_a_uuid_is_a_bad_request() {
        let (status, body) = send(app(empty_db()), Method::GET, "/scenes/not-a-uuid", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn chapter_filter_that_is_not_a_uuid_is_a_bad_request() {
        let (status, body) =
            send(app(empty_db()), Method::GET, "/chapters?work_id=nope", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn deleting_a_missing_transition_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let uri = format!("/transitions/{}", Id::new_v4());

        let (status, _) = send(app(db), Method::DELETE, &uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
