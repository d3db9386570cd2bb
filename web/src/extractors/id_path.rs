use super::rejected;
use crate::Error;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use domain::Id;

/// The `{id}` segment of a resource path.
pub(crate) struct IdPath(pub Id);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<Id>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => Err(rejected("path id", rejection.body_text())),
        }
    }
}
