use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use domain::error::{DomainErrorKind, EntityErrorKind, Error as DomainError, InternalErrorKind};

use crate::controller::ApiResponse;

use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match &self.0.error_kind {
            DomainErrorKind::Validation(_) => StatusCode::BAD_REQUEST,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Conflict)) => {
                StatusCode::CONFLICT
            }
            DomainErrorKind::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// The only place where domain errors become HTTP statuses.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        } else {
            debug!("Request rejected with {status}: {:?}", self.0.error_kind);
        }

        (status, Json(ApiResponse::error(self.0.message()))).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use sea_orm::DbErr;
    use serde_json::json;

    async fn status_and_body(err: DomainError) -> (StatusCode, serde_json::Value) {
        let response = Error::from(err).into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_is_bad_request() {
        let (status, body) =
            status_and_body(DomainError::validation("A scene cannot follow itself")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"status": "error", "message": "A scene cannot follow itself"})
        );
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, body) = status_and_body(DomainError::not_found()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn conflict_is_409() {
        let (status, _) = status_and_body(DomainError::conflict()).await;

        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn everything_else_is_an_opaque_500() {
        let err = DomainError::from(DbErr::Custom("pool exhausted".to_string()));

        let (status, body) = status_and_body(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
        assert!(!body.to_string().contains("pool exhausted"));
    }
}
