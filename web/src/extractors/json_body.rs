use super::rejected;
use crate::Error;
use axum::extract::{FromRequest, Request};
use axum::extract::rejection::JsonRejection;
use axum::Json;

/// `Json<T>` whose malformed or incomplete bodies become a 400 validation error.
pub(crate) struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejected("request body", rejection.body_text())),
        }
    }
}
